//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod attachment;
pub mod board;
pub mod filter;
pub mod pagination;
pub mod reply;
pub mod validation;

pub use attachment::{Attachment, StoredAttachment};
pub use board::{validate_userid, Board, BoardDetail, BoardSummary, NewBoard};
pub use filter::{FilterType, SearchFilter};
pub use pagination::{Paginated, Pager, Pagination, PAGE_BLOCK, PAGE_SIZE};
pub use reply::{NewReply, Reply, ReplyForm};
pub use validation::ValidationError;
