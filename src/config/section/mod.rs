//! Configuration section definitions.

mod htaccess;
mod serve;
mod site;
mod sitemap;
mod store;

pub use htaccess::HtaccessConfig;
pub use serve::ServeConfig;
pub use site::SiteInfoConfig;
pub use sitemap::SitemapConfig;
pub use store::StoreConfig;
