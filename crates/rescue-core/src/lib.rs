#![deny(warnings)]
pub mod game;
pub mod model;
pub mod search;

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "capesearch"
    }

    pub const fn codename() -> &'static str {
        "Cape Rescue"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}

#[cfg(test)]
mod tests {
    use super::AppInfo;

    #[test]
    fn exposes_static_metadata() {
        assert_eq!(AppInfo::name(), "capesearch");
        assert_eq!(AppInfo::codename(), "Cape Rescue");
        assert!(!AppInfo::version().is_empty());
    }
}
