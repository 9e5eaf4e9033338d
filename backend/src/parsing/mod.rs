//! Parameter parsing for the VO query endpoints.

pub mod params;

pub use params::{
    parse_max_rec, parse_min_obs, parse_position, parse_query, parse_query_at, parse_time_range,
    parse_time_range_at, RawQuery,
};
