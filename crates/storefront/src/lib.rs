pub mod config;
pub mod fixtures;
pub mod logging;
pub mod session;
pub mod view;

pub use config::{
    ConfigError, ConfigOverrides, LoadOptions, LogFormat, LoggingConfig, StorefrontConfig,
};
pub use fixtures::{builtin_catalog, catalog_from_config, load_catalog, CatalogLoadError};
pub use session::{CartCommandError, CartIntent, CartSession};
pub use view::{
    cart_panel, format_price, product_card, storefront_page, CartLineView, CartPanelView,
    ProductCardView, StorefrontPage,
};
