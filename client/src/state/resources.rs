//! Resource directory filter state.
//!
//! DESIGN
//! ======
//! Select boxes carry a "no filter" option whose label doubles as its value
//! ("All", "All Types", ...). The state keeps the labels so the controls stay
//! bound to what the user picked, and strips them when building a query.

#[cfg(test)]
#[path = "resources_test.rs"]
mod resources_test;

use crate::net::types::ResourceQuery;

pub const ANY_CATEGORY: &str = "All";
pub const ANY_KIND: &str = "All Types";
pub const ANY_DURATION: &str = "Any Duration";
pub const ANY_RATING: &str = "Any Rating";

pub const KIND_OPTIONS: [&str; 4] = [ANY_KIND, "Course", "Workshop", "Mentorship"];
pub const DURATION_OPTIONS: [&str; 4] = [ANY_DURATION, "Short Term", "Medium Term", "Long Term"];
pub const RATING_OPTIONS: [&str; 4] = [ANY_RATING, "4+ Stars", "3+ Stars", "2+ Stars"];

/// Which filter select a change event came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterField {
    Category,
    Kind,
    Duration,
    Rating,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceFilters {
    pub category: String,
    pub search: String,
    pub kind: String,
    pub duration: String,
    pub rating: String,
    pub expanded: bool,
}

impl Default for ResourceFilters {
    fn default() -> Self {
        Self {
            category: ANY_CATEGORY.to_owned(),
            search: String::new(),
            kind: ANY_KIND.to_owned(),
            duration: ANY_DURATION.to_owned(),
            rating: ANY_RATING.to_owned(),
            expanded: false,
        }
    }
}

impl ResourceFilters {
    pub fn set(&mut self, field: FilterField, value: String) {
        match field {
            FilterField::Category => self.category = value,
            FilterField::Kind => self.kind = value,
            FilterField::Duration => self.duration = value,
            FilterField::Rating => self.rating = value,
        }
    }

    /// Back to the unfiltered listing; the panel stays as it was.
    pub fn clear(&mut self) {
        *self = Self { expanded: self.expanded, ..Self::default() };
    }

    pub fn toggle_expanded(&mut self) {
        self.expanded = !self.expanded;
    }

    /// True when any filter narrows the listing.
    pub fn is_filtered(&self) -> bool {
        let query = self.to_query();
        !query.to_query_string().is_empty()
    }

    pub fn to_query(&self) -> ResourceQuery {
        ResourceQuery {
            category: unless_sentinel(&self.category, ANY_CATEGORY),
            search: self.search.trim().to_owned(),
            kind: unless_sentinel(&self.kind, ANY_KIND),
            duration: unless_sentinel(&self.duration, ANY_DURATION),
            rating: unless_sentinel(&self.rating, ANY_RATING),
        }
    }
}

/// Category select options: the "All" sentinel followed by the fetched names.
pub fn category_options(fetched: Vec<String>) -> Vec<String> {
    let mut options = vec![ANY_CATEGORY.to_owned()];
    for name in fetched {
        let name = name.trim();
        if !name.is_empty() && !options.iter().any(|o| o == name) {
            options.push(name.to_owned());
        }
    }
    options
}

fn unless_sentinel(value: &str, sentinel: &str) -> String {
    let value = value.trim();
    if value == sentinel { String::new() } else { value.to_owned() }
}
