use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::Serialize;

/// Anatomical partitions with one payload file each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Ca1,
    Ca2,
    Ca3,
    Dg,
}

impl Region {
    pub const ALL: [Region; 4] = [Region::Ca1, Region::Ca2, Region::Ca3, Region::Dg];

    pub fn key(self) -> &'static str {
        match self {
            Region::Ca1 => "ca1",
            Region::Ca2 => "ca2",
            Region::Ca3 => "ca3",
            Region::Dg => "dg",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Region::Ca1 => "CA1",
            Region::Ca2 => "CA2",
            Region::Ca3 => "CA3",
            Region::Dg => "Dentate Gyrus (DG)",
        }
    }

    pub fn in_flag(self) -> String {
        format!("in_{}", self.key())
    }

    pub fn correct_flag(self) -> String {
        format!("is_{}", self.key())
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Region::ALL
            .into_iter()
            .find(|r| r.key() == lower)
            .ok_or_else(|| format!("unknown region: {s} (use ca1|ca2|ca3|dg)"))
    }
}
