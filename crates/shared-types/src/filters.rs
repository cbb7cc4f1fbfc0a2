//! Filter sets for the bid, job, and user list screens.
//!
//! A [`FilterSet`] maps a screen's filter keys to values. Absent keys, empty
//! strings, and explicit nulls are all "not applied": they are not counted by
//! [`FilterSet::active_count`] and never reach the query string.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::{format_query_number, QueryParams};

/// A single filter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Number(f64),
    Text(String),
    Null,
}

impl FilterValue {
    pub fn text(s: impl Into<String>) -> Self {
        FilterValue::Text(s.into())
    }

    /// A value counts as applied unless it is null or an empty string.
    pub fn is_active(&self) -> bool {
        match self {
            FilterValue::Text(s) => !s.is_empty(),
            FilterValue::Number(_) => true,
            FilterValue::Null => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FilterValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FilterValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn to_query_value(&self) -> Option<String> {
        match self {
            FilterValue::Text(s) if !s.is_empty() => Some(s.clone()),
            FilterValue::Number(n) => Some(format_query_number(*n)),
            _ => None,
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Text(s) => write!(f, "{s}"),
            FilterValue::Number(n) => write!(f, "{}", format_query_number(*n)),
            FilterValue::Null => Ok(()),
        }
    }
}

/// Coerce a numeric text input. Empty or unparseable input leaves the filter unset.
pub fn number_from_input(input: &str) -> Option<FilterValue> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .map(FilterValue::Number)
}

/// The keys of one screen's filter set.
pub trait FilterKey: Copy + Ord + fmt::Debug + 'static {
    /// Every key in display order.
    const KEYS: &'static [Self];

    /// Query-string and wire name.
    fn as_str(&self) -> &'static str;

    fn label(&self) -> &'static str;

    /// The other end of a min/max or from/to pair, if this key has one.
    fn range_partner(&self) -> Option<Self> {
        None
    }

    /// True for the lower bound of a range pair.
    fn is_range_start(&self) -> bool {
        false
    }
}

/// A removable chip describing one applied filter (or range pair).
#[derive(Debug, Clone, PartialEq)]
pub struct FilterChip<K> {
    pub keys: Vec<K>,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterSet<K: FilterKey> {
    values: BTreeMap<K, FilterValue>,
}

impl<K: FilterKey> Default for FilterSet<K> {
    fn default() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }
}

impl<K: FilterKey> FilterSet<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`, keeping the entry even when the value is empty.
    pub fn set(&mut self, key: K, value: FilterValue) {
        self.values.insert(key, value);
    }

    pub fn with(mut self, key: K, value: FilterValue) -> Self {
        self.set(key, value);
        self
    }

    /// Delete `key` entirely.
    pub fn remove(&mut self, key: K) {
        self.values.remove(&key);
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn get(&self, key: K) -> Option<&FilterValue> {
        self.values.get(&key)
    }

    pub fn contains_key(&self, key: K) -> bool {
        self.values.contains_key(&key)
    }

    /// The value of `key` when it is applied text.
    pub fn text(&self, key: K) -> Option<&str> {
        self.get(key)
            .filter(|v| v.is_active())
            .and_then(FilterValue::as_text)
    }

    pub fn number(&self, key: K) -> Option<f64> {
        self.get(key).and_then(FilterValue::as_number)
    }

    pub fn is_active(&self, key: K) -> bool {
        self.get(key).is_some_and(FilterValue::is_active)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of keys holding an applied value.
    pub fn active_count(&self) -> usize {
        self.values.values().filter(|v| v.is_active()).count()
    }

    /// Applied values as query parameters, in key order.
    pub fn to_query(&self) -> QueryParams {
        self.values
            .iter()
            .filter_map(|(k, v)| v.to_query_value().map(|q| (k.as_str(), q)))
            .collect()
    }

    /// One chip per applied key, with range pairs collapsed into one chip.
    pub fn chips(&self) -> Vec<FilterChip<K>> {
        let mut chips = Vec::new();
        for key in K::KEYS {
            if !self.is_active(*key) {
                continue;
            }
            match key.range_partner() {
                Some(partner) if self.is_active(partner) => {
                    if !key.is_range_start() {
                        continue;
                    }
                    chips.push(FilterChip {
                        keys: vec![*key, partner],
                        label: format!(
                            "{}: {} - {}",
                            range_label(key.label()),
                            self.values[key],
                            self.values[&partner]
                        ),
                    });
                }
                _ => chips.push(FilterChip {
                    keys: vec![*key],
                    label: format!("{}: {}", key.label(), self.values[key]),
                }),
            }
        }
        chips
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &FilterValue)> {
        self.values.iter()
    }
}

fn range_label(label: &str) -> &str {
    label
        .trim_end_matches(" Min")
        .trim_end_matches(" Max")
        .trim_end_matches(" From")
        .trim_end_matches(" To")
}

// ---------------------------------------------------------------------------
// Composer
// ---------------------------------------------------------------------------

/// Local shadow copy of a screen's filters.
///
/// Every mutation returns the full updated set so the owner can be told of
/// the change immediately.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterComposer<K: FilterKey> {
    shadow: FilterSet<K>,
}

impl<K: FilterKey> FilterComposer<K> {
    pub fn new(initial: FilterSet<K>) -> Self {
        Self { shadow: initial }
    }

    pub fn current(&self) -> &FilterSet<K> {
        &self.shadow
    }

    /// Replace the shadow copy when the owner's filters change.
    pub fn sync(&mut self, filters: FilterSet<K>) {
        self.shadow = filters;
    }

    /// Merge one field. `None` removes the key.
    pub fn change(&mut self, key: K, value: Option<FilterValue>) -> FilterSet<K> {
        match value {
            Some(v) => self.shadow.set(key, v),
            None => self.shadow.remove(key),
        }
        self.shadow.clone()
    }

    /// Merge a select value where the `"all"` choice clears the key.
    pub fn change_select(&mut self, key: K, value: &str) -> FilterSet<K> {
        let value = (value != crate::common::ALL).then(|| FilterValue::text(value));
        self.change(key, value)
    }

    /// Merge a numeric text input.
    pub fn change_number(&mut self, key: K, input: &str) -> FilterSet<K> {
        self.change(key, number_from_input(input))
    }

    pub fn remove(&mut self, key: K) -> FilterSet<K> {
        self.shadow.remove(key);
        self.shadow.clone()
    }

    /// Remove every key a chip stands for.
    pub fn remove_chip(&mut self, chip: &FilterChip<K>) -> FilterSet<K> {
        for key in &chip.keys {
            self.shadow.remove(*key);
        }
        self.shadow.clone()
    }

    pub fn reset(&mut self) -> FilterSet<K> {
        self.shadow.clear();
        self.shadow.clone()
    }

    pub fn active_count(&self) -> usize {
        self.shadow.active_count()
    }
}

// ---------------------------------------------------------------------------
// Key sets
// ---------------------------------------------------------------------------

macro_rules! filter_keys {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($variant:ident => ($wire:literal, $label:literal)),+ $(,)?
        }
        ranges { $($lo:ident .. $hi:ident),* $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl FilterKey for $name {
            const KEYS: &'static [Self] = &[$($name::$variant),+];

            fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }

            fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            #[allow(unreachable_patterns)]
            fn range_partner(&self) -> Option<Self> {
                match self {
                    $(
                        $name::$lo => Some($name::$hi),
                        $name::$hi => Some($name::$lo),
                    )*
                    _ => None,
                }
            }

            #[allow(unreachable_patterns)]
            fn is_range_start(&self) -> bool {
                match self {
                    $($name::$lo => true,)*
                    _ => false,
                }
            }
        }
    };
}

filter_keys! {
    /// Filters on the bid list.
    BidFilterKey {
        Status => ("status", "Status"),
        TradeType => ("trade_type", "Trade Type"),
        BudgetMin => ("budget_min", "Budget Min"),
        BudgetMax => ("budget_max", "Budget Max"),
        DeadlineFrom => ("deadline_from", "Deadline From"),
        DeadlineTo => ("deadline_to", "Deadline To"),
        CreatedBy => ("created_by", "Created By"),
    }
    ranges { BudgetMin..BudgetMax, DeadlineFrom..DeadlineTo }
}

filter_keys! {
    /// Filters on the job list.
    JobFilterKey {
        Status => ("status", "Status"),
        TradeType => ("trade_type", "Trade Type"),
        DateFrom => ("date_from", "Posted From"),
        DateTo => ("date_to", "Posted To"),
        BudgetMin => ("budget_min", "Budget Min"),
        BudgetMax => ("budget_max", "Budget Max"),
        Location => ("location", "Location"),
        PostedBy => ("posted_by", "Posted By"),
    }
    ranges { DateFrom..DateTo, BudgetMin..BudgetMax }
}

filter_keys! {
    /// Filters on the user list.
    UserFilterKey {
        Role => ("role", "Role"),
        Status => ("status", "Status"),
        VerificationStatus => ("verification_status", "Verification"),
        DateFrom => ("date_from", "Joined From"),
        DateTo => ("date_to", "Joined To"),
        TrustScoreMin => ("trust_score_min", "Trust Score Min"),
        TrustScoreMax => ("trust_score_max", "Trust Score Max"),
        Location => ("location", "Location"),
        Search => ("search", "Search"),
    }
    ranges { DateFrom..DateTo, TrustScoreMin..TrustScoreMax }
}

pub type BidFilters = FilterSet<BidFilterKey>;
pub type JobFilters = FilterSet<JobFilterKey>;
pub type UserFilters = FilterSet<UserFilterKey>;

pub const BID_FILTER_STATUSES: &[&str] = &["open", "closed", "awarded"];
pub const JOB_FILTER_STATUSES: &[&str] = &["open", "in_progress", "completed", "cancelled", "closed"];
pub const TRADE_TYPES: &[&str] = &[
    "general",
    "electrical",
    "plumbing",
    "hvac",
    "roofing",
    "carpentry",
    "painting",
    "landscaping",
    "concrete",
    "masonry",
];
