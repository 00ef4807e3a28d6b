//! Train category filtering.
//!
//! Tickets are classified by single-letter categories: five keyed off the
//! public train code's leading letter, one catch-all, and two keyed off
//! decoded amenities.

use std::fmt;

use super::ticket::TicketInfo;

/// Error returned when parsing an invalid filter string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidFilter {
    #[error("unknown train filter flag '{0}', expected one of G/D/Z/T/K/O/F/S")]
    UnknownFlag(char),

    #[error("train filter string too long: {0} flags (max {MAX_FLAGS})")]
    TooLong(usize),
}

/// Maximum number of flags accepted in one filter string.
const MAX_FLAGS: usize = 8;

/// A ticket category selectable in a query filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainCategory {
    /// 高铁/城际: train code starts with "G" or "C".
    HighSpeed,
    /// 动车: train code starts with "D".
    Emu,
    /// 直达特快: train code starts with "Z".
    DirectExpress,
    /// 特快: train code starts with "T".
    Express,
    /// 快速: train code starts with "K".
    Fast,
    /// Everything matching none of the five letter categories.
    Other,
    /// Trains carrying the "复兴号" amenity tag.
    Fuxing,
    /// Trains carrying the "智能动车组" amenity tag.
    SmartEmu,
}

impl TrainCategory {
    /// Parse one filter letter.
    pub fn from_flag(flag: char) -> Result<Self, InvalidFilter> {
        match flag {
            'G' => Ok(Self::HighSpeed),
            'D' => Ok(Self::Emu),
            'Z' => Ok(Self::DirectExpress),
            'T' => Ok(Self::Express),
            'K' => Ok(Self::Fast),
            'O' => Ok(Self::Other),
            'F' => Ok(Self::Fuxing),
            'S' => Ok(Self::SmartEmu),
            other => Err(InvalidFilter::UnknownFlag(other)),
        }
    }

    /// Does this ticket fall into the category?
    pub fn matches(self, ticket: &TicketInfo) -> bool {
        let code = &ticket.start_train_code;
        match self {
            Self::HighSpeed => code.starts_with('G') || code.starts_with('C'),
            Self::Emu => code.starts_with('D'),
            Self::DirectExpress => code.starts_with('Z'),
            Self::Express => code.starts_with('T'),
            Self::Fast => code.starts_with('K'),
            Self::Other => {
                !Self::HighSpeed.matches(ticket)
                    && !Self::Emu.matches(ticket)
                    && !Self::DirectExpress.matches(ticket)
                    && !Self::Express.matches(ticket)
                    && !Self::Fast.matches(ticket)
            }
            Self::Fuxing => ticket.amenities.iter().any(|a| a == "复兴号"),
            Self::SmartEmu => ticket.amenities.iter().any(|a| a == "智能动车组"),
        }
    }
}

impl fmt::Display for TrainCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flag = match self {
            Self::HighSpeed => 'G',
            Self::Emu => 'D',
            Self::DirectExpress => 'Z',
            Self::Express => 'T',
            Self::Fast => 'K',
            Self::Other => 'O',
            Self::Fuxing => 'F',
            Self::SmartEmu => 'S',
        };
        write!(f, "{flag}")
    }
}

/// A parsed set of category filters.
#[derive(Debug, Clone, Default)]
pub struct CategoryFilter {
    categories: Vec<TrainCategory>,
}

impl CategoryFilter {
    /// Parse a filter string like "GD" or "" (at most 8 flags).
    pub fn parse(flags: &str) -> Result<Self, InvalidFilter> {
        let count = flags.chars().count();
        if count > MAX_FLAGS {
            return Err(InvalidFilter::TooLong(count));
        }
        let categories = flags
            .chars()
            .map(TrainCategory::from_flag)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { categories })
    }

    /// Keep the tickets matching any requested category.
    ///
    /// An empty filter keeps everything: it means "no filtering requested",
    /// not "match all categories", so it short-circuits before the
    /// predicates run.
    pub fn apply(&self, tickets: Vec<TicketInfo>) -> Vec<TicketInfo> {
        if self.categories.is_empty() {
            return tickets;
        }
        tickets
            .into_iter()
            .filter(|t| self.categories.iter().any(|c| c.matches(t)))
            .collect()
    }
}
