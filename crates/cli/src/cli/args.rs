// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use clap::Args;
use tj_core::TripInput;

use crate::error::{Error, Result};

use super::{date_arg, non_empty_string};

/// Fields of a new trip.
#[derive(Args, Clone, Debug, Default)]
pub struct TripArgs {
    /// Trip title
    #[arg(value_parser = non_empty_string)]
    pub title: String,

    /// Where the trip goes
    #[arg(long, short, default_value = "")]
    pub destination: String,

    /// First day (YYYY-MM-DD)
    #[arg(long, value_parser = date_arg, value_name = "DATE")]
    pub start: Option<String>,

    /// Last day (YYYY-MM-DD), not before --start
    #[arg(long, value_parser = date_arg, value_name = "DATE")]
    pub end: Option<String>,

    /// Free-form description
    #[arg(long, default_value = "")]
    pub description: String,

    /// Cover image URL (see `tj upload`)
    #[arg(long, value_name = "URL")]
    pub image: Option<String>,

    /// Photo URL (repeatable)
    #[arg(long = "photo", value_name = "URL")]
    pub photos: Vec<String>,
}

impl TripArgs {
    /// Convert into the input the sync engine accepts.
    ///
    /// Each field was checked by its value parser; this adds the date-range check.
    pub fn into_input(self) -> Result<TripInput> {
        let input = TripInput {
            title: self.title,
            destination: self.destination,
            start_date: self.start.unwrap_or_default(),
            end_date: self.end.unwrap_or_default(),
            description: self.description,
            image: self.image,
            photos: self.photos,
            ..TripInput::default()
        };
        input.validate().map_err(|e| match e {
            tj_core::Error::InvalidTrip(reason) => Error::InvalidTrip(reason),
            other => Error::InvalidTrip(other.to_string()),
        })?;
        Ok(input)
    }
}
