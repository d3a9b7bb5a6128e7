pub mod timing;

pub use timing::{
    RequestContext, RequestInfo, RequestTimer, ResponseInfo, TimingMiddleware, UNMATCHED_ROUTE,
};
