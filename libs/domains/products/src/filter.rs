//! Product listing filter.
//!
//! Query parameters are parsed once into a [`ProductFilter`], which can either
//! be rendered as a MongoDB filter document or evaluated against a product in
//! memory. Parsing never fails: a value that cannot be understood becomes a
//! criterion that matches nothing.

use mongodb::bson::{Bson, Document, doc};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::models::Product;

const DESCRIPTION: &str = "description";
const PRICE: &str = "price";
const IS_ACTIVE: &str = "isActive";
const RATING: &str = "rating";
const NUM_REVIEWS: &str = "numReviews";

/// Query parameters accepted when listing products
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct ProductQuery {
    /// Case-insensitive substring of the description
    pub search: Option<String>,
    /// Comma-separated price ranges, e.g. `1000-2000,4100-*`
    pub price: Option<String>,
    /// `true` or `false`
    pub active: Option<String>,
    /// Exact derived rating
    pub rating: Option<String>,
    /// Comma-separated ranges on the number of reviews
    pub reviews: Option<String>,
    /// Maximum number of results
    pub limit: Option<String>,
    /// Number of results to skip
    pub offset: Option<String>,
}

/// Inclusive numeric interval; `max: None` is unbounded above
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericRange {
    pub min: f64,
    pub max: Option<f64>,
}

impl NumericRange {
    /// Parse `low-high` or `low-*`.
    ///
    /// Returns `None` for non-numeric bounds, a wildcard lower bound or a
    /// reversed range.
    pub fn parse(raw: &str) -> Option<Self> {
        let (low, high) = raw.trim().split_once('-')?;
        let min = parse_finite(low)?;
        let max = match high.trim() {
            "*" => None,
            high => Some(parse_finite(high)?),
        };

        match max {
            Some(max) if max < min => None,
            _ => Some(Self { min, max }),
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && self.max.is_none_or(|max| value <= max)
    }

    fn to_bounds(self) -> Document {
        let mut bounds = doc! { "$gte": self.min };
        if let Some(max) = self.max {
            bounds.insert("$lte", max);
        }
        bounds
    }
}

fn parse_finite(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// A single criterion; all criteria of a filter must hold
#[derive(Debug, Clone, PartialEq)]
pub enum FieldFilter {
    Search(String),
    Price(Vec<NumericRange>),
    Active(bool),
    Rating(i32),
    Reviews(Vec<NumericRange>),
    /// An unparsable value for the named field
    MatchNothing(&'static str),
}

impl FieldFilter {
    fn matches(&self, product: &Product) -> bool {
        match self {
            Self::Search(needle) => product
                .description
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            Self::Price(ranges) => ranges.iter().any(|r| r.contains(product.price)),
            Self::Active(active) => product.is_active == *active,
            Self::Rating(rating) => product.rating == *rating,
            Self::Reviews(ranges) => ranges
                .iter()
                .any(|r| r.contains(f64::from(product.num_reviews))),
            Self::MatchNothing(_) => false,
        }
    }
}

/// Parsed listing filter with optional pagination
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub clauses: Vec<FieldFilter>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl ProductFilter {
    pub fn from_query(query: &ProductQuery) -> Self {
        let mut clauses = Vec::new();

        if let Some(search) = query.search.as_deref().filter(|v| !v.trim().is_empty()) {
            clauses.push(FieldFilter::Search(search.to_string()));
        }
        if let Some(price) = non_blank(&query.price) {
            clauses.push(ranges_clause(price, PRICE, FieldFilter::Price));
        }
        if let Some(active) = non_blank(&query.active) {
            clauses.push(match active.to_ascii_lowercase().as_str() {
                "true" => FieldFilter::Active(true),
                "false" => FieldFilter::Active(false),
                _ => FieldFilter::MatchNothing(IS_ACTIVE),
            });
        }
        if let Some(rating) = non_blank(&query.rating) {
            clauses.push(
                parse_finite(rating)
                    .filter(|v| v.fract() == 0.0 && v.abs() <= f64::from(i32::MAX))
                    .map(|v| FieldFilter::Rating(v as i32))
                    .unwrap_or(FieldFilter::MatchNothing(RATING)),
            );
        }
        if let Some(reviews) = non_blank(&query.reviews) {
            clauses.push(ranges_clause(reviews, NUM_REVIEWS, FieldFilter::Reviews));
        }

        Self {
            clauses,
            limit: non_blank(&query.limit).and_then(|v| v.parse().ok()),
            offset: non_blank(&query.offset).and_then(|v| v.parse().ok()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn matches(&self, product: &Product) -> bool {
        self.clauses.iter().all(|clause| clause.matches(product))
    }

    /// Render as a MongoDB query document.
    pub fn to_document(&self) -> Document {
        let mut filter = Document::new();
        let mut alternatives: Vec<Vec<Document>> = Vec::new();

        for clause in &self.clauses {
            match clause {
                FieldFilter::Search(needle) => {
                    filter.insert(
                        DESCRIPTION,
                        doc! { "$regex": regex::escape(needle), "$options": "i" },
                    );
                }
                FieldFilter::Price(ranges) => {
                    render_ranges(&mut filter, &mut alternatives, PRICE, ranges)
                }
                FieldFilter::Active(active) => {
                    filter.insert(IS_ACTIVE, *active);
                }
                FieldFilter::Rating(rating) => {
                    filter.insert(RATING, *rating);
                }
                FieldFilter::Reviews(ranges) => {
                    render_ranges(&mut filter, &mut alternatives, NUM_REVIEWS, ranges)
                }
                FieldFilter::MatchNothing(field) => {
                    filter.insert(*field, doc! { "$in": Bson::Array(Vec::new()) });
                }
            }
        }

        match alternatives.len() {
            0 => {}
            1 => {
                filter.insert("$or", alternatives.remove(0));
            }
            _ => {
                let groups: Vec<Document> = alternatives
                    .into_iter()
                    .map(|branches| doc! { "$or": branches })
                    .collect();
                filter.insert("$and", groups);
            }
        }

        filter
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn ranges_clause(
    raw: &str,
    field: &'static str,
    clause: fn(Vec<NumericRange>) -> FieldFilter,
) -> FieldFilter {
    let ranges: Vec<NumericRange> = raw.split(',').filter_map(NumericRange::parse).collect();
    if ranges.is_empty() {
        tracing::debug!(field, value = raw, "No usable range, filter matches nothing");
        FieldFilter::MatchNothing(field)
    } else {
        clause(ranges)
    }
}

/// One range goes straight onto the field; several become an `$or` group.
fn render_ranges(
    filter: &mut Document,
    alternatives: &mut Vec<Vec<Document>>,
    field: &str,
    ranges: &[NumericRange],
) {
    match ranges {
        [single] => {
            filter.insert(field, single.to_bounds());
        }
        _ => alternatives.push(
            ranges
                .iter()
                .map(|r| {
                    let mut branch = Document::new();
                    branch.insert(field, r.to_bounds());
                    branch
                })
                .collect(),
        ),
    }
}
