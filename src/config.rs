use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Interface the dashboard binds to.
pub const HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

pub const PORT: u16 = 10000;

/// Source table, read once at startup. `.xlsx`, `.csv`, `.json` and
/// `.parquet` work.
pub const DATASET_PATH: &str = "Final_updated_enslaver_data.xlsx";

/// Sentinel option meaning "no restriction" in both selection controls.
pub const ALL_OPTION: &str = "All";

pub fn bind_addr() -> SocketAddr {
    SocketAddr::new(HOST, PORT)
}
