//! HTTP request handlers for the snowmap API.
//!
//! This module contains all the endpoint handlers for the web server.

pub mod choropleth;
pub mod heartbeat;
pub mod legend;
pub mod metadata;
pub mod table;

pub use choropleth::choropleth_handler;
pub use heartbeat::heartbeat_handler;
pub use legend::legend_handler;
pub use metadata::metadata_handler;
pub use table::table_handler;

use std::str::FromStr;

use crate::error::Result;
use crate::survey::{Characteristic, MonthKey, Scale};

/// A validated (scale, characteristic, attribute, month) selection shared by
/// the choropleth and table endpoints.
#[derive(Debug, Clone)]
pub(crate) struct Selection {
    pub scale: Scale,
    pub characteristic: Characteristic,
    pub attribute: String,
    pub month: MonthKey,
}

impl Selection {
    pub(crate) fn parse(
        scale: &str,
        characteristic: &str,
        attribute: &str,
        year: u16,
        month: u8,
    ) -> Result<Self> {
        let scale = Scale::from_str(scale)?;
        let characteristic = Characteristic::from_str(characteristic)?;
        characteristic.validate_attribute(attribute)?;
        let month = MonthKey::new(year, month)?;

        Ok(Self {
            scale,
            characteristic,
            attribute: attribute.to_string(),
            month,
        })
    }
}
