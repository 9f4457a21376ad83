use chrono::{Local, Timelike};
use model::{item::FoodItem, WithId};

use crate::{aggregate::Page, config::HoursPolicy};

/// The one tag whose filter consults opening hours.
pub const SUPPER_TAG: &str = "Supper";

#[derive(Debug, Clone, Copy)]
pub struct TagFilterOptions {
    pub page: Page,
    /// Probe hour for time-sensitive tags; wall-clock hour when unset.
    pub hour: Option<u32>,
}

impl TagFilterOptions {
    pub fn new(page: Page) -> Self {
        Self { page, hour: None }
    }

    pub fn at_hour(mut self, hour: u32) -> Self {
        self.hour = Some(hour);
        self
    }
}

pub fn is_time_sensitive(tag: &str) -> bool {
    tag == SUPPER_TAG
}

pub(crate) fn current_hour() -> u32 {
    Local::now().hour()
}

/// Case-sensitive tag membership, plus the opening-hours check for
/// time-sensitive tags. Hours can only exclude an item under
/// [`HoursPolicy::Strict`], and even then only when they parse and provably
/// say "closed".
pub fn apply_tag_filter(
    mut items: Vec<WithId<FoodItem>>,
    tag: &str,
    hour: u32,
    policy: HoursPolicy,
) -> Vec<WithId<FoodItem>> {
    items.retain(|item| item.content.has_tag(tag));
    if is_time_sensitive(tag) && policy == HoursPolicy::Strict {
        items.retain(|item| match &item.content.opening_hours {
            Some(hours) => hours.is_open_at_hour(hour) != Some(false),
            None => true,
        });
    }
    items
}
