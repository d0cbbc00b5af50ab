//! Search request and result model.

pub mod options;
pub mod result;

pub use options::{
    DEFAULT_IMAGE_LINKS, DEFAULT_LINKS, DEFAULT_NUM_RESULTS, DEFAULT_SUBPAGES, SearchOptions,
    SearchRequest,
};
pub use result::{RESULT_DELIMITER, SearchHit, SearchResults};
