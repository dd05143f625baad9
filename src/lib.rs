//! `xtools` is a semi-modular toolkit for the versioned file formats of a
//! Monte-Carlo X-ray microanalysis simulator
//!
#![doc = include_str!("../readme.md")]
#![deny(missing_docs, missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

// Re-exports of toolkit crates.
#[doc(inline)]
pub use xtools_utils as utils;

#[doc(inline)]
pub use xtools_schema as schema;

#[cfg(feature = "deck")]
#[cfg_attr(docsrs, doc(cfg(feature = "deck")))]
#[doc(inline)]
pub use xtools_deck as deck;

#[cfg(feature = "results")]
#[cfg_attr(docsrs, doc(cfg(feature = "results")))]
#[doc(inline)]
pub use xtools_results as results;
