#![doc(test(attr(deny(warnings))))]

//! Gestion de Stock core: French spelling of invoice amounts and the
//! document totals (HT, TVA, timbre, TTC) they are printed under.
//!
//! ```
//! use gestion_stock::{spell, MonetaryAmount};
//!
//! let amount: MonetaryAmount = "1250,15".parse().unwrap();
//! assert_eq!(
//!     spell(amount).as_str(),
//!     "*** mille deux cent cinquante Da et quinze centimes."
//! );
//! ```

pub mod amount;
pub mod cli;
pub mod config;
pub mod document;
pub mod errors;
#[cfg(feature = "ffi")]
pub mod ffi;
pub mod speller;
pub mod utils;

pub use amount::MonetaryAmount;
pub use errors::{AmountError, StockError};
pub use speller::{spell, spell_f64, AmountSpeller, SpelledAmount};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Gestion de Stock core tracing initialized.");
    });
}
