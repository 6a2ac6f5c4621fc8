mod detail_router_util;

pub use detail_router_util::{DetailRouter, DetailRouterUtil};
