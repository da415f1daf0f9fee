//! Supplier feed ingestion: decoding the tabular export, folding rows into
//! products, and assembling the storefront catalog.

pub mod assemble;
pub mod badge;
pub mod brand;
pub mod classify;
pub mod client;
pub mod decode;
pub mod error;
pub mod group;
pub mod html;
pub mod pipeline;
pub mod size;
pub mod types;

mod parse_helpers;
mod rate_limit;

pub use assemble::{assemble_catalog, build_category_index, filter_relevant};
pub use badge::{resolve_badge, resolve_price, ResolvedPrice};
pub use brand::BrandExtractor;
pub use classify::Classifier;
pub use client::FeedClient;
pub use decode::{decode, encode_records, ColumnMismatch, DecodeStats, DecodedFeed, RawRecord};
pub use error::FeedError;
pub use group::group_by_handle;
pub use html::strip_html;
pub use pipeline::{catalog_from_backend, import_feed, read_feed, ImportReport};
pub use size::SizeNormalizer;
pub use types::ApiResponse;
