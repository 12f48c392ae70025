//! Pure ranking pipeline: classify the request, filter the roster by area,
//! score the survivors and rank them.
//!
//! Every function here is total and deterministic. No I/O, no mutation of
//! inputs; degenerate inputs (empty roster, missing title, absent property)
//! map to defined outputs instead of errors.

use crate::core::policy::ScoringPolicy;
use crate::domain::model::{
    PropertyLocation, RankedCandidate, ServiceCategory, ServiceProvider, ServiceRequest,
};

/// Infer the service category from the request title.
///
/// Keyword rules are checked in policy order, so a title matching both
/// plumbing and electrical keywords resolves to plumbing under the default
/// policy. Missing or unmatched titles resolve to `general`.
pub fn classify_service(request: &ServiceRequest, policy: &ScoringPolicy) -> ServiceCategory {
    let title = match &request.title {
        Some(t) => t.to_lowercase(),
        None => return ServiceCategory::General,
    };

    for rule in &policy.keyword_rules {
        if rule
            .keywords
            .iter()
            .any(|kw| title.contains(&kw.to_lowercase()))
        {
            return rule.category;
        }
    }

    ServiceCategory::General
}

/// Keep providers whose claimed service areas match the property location.
///
/// Matching is a lower-cased substring search of each service area against
/// the concatenated city, address and county text. Area matching is advisory:
/// with no property, or when no provider matches, the full roster is
/// returned, so a non-empty roster never filters down to nothing.
pub fn filter_by_area<'a>(
    providers: &'a [ServiceProvider],
    property: Option<&PropertyLocation>,
) -> Vec<&'a ServiceProvider> {
    let property = match property {
        Some(p) => p,
        None => return providers.iter().collect(),
    };

    let search_text = [
        property.city.as_deref().unwrap_or(""),
        property.full_address.as_deref().unwrap_or(""),
        property.county.as_deref().unwrap_or(""),
    ]
    .join(" ")
    .to_lowercase();

    let matched: Vec<&ServiceProvider> = providers
        .iter()
        .filter(|p| {
            p.service_areas
                .iter()
                .any(|area| search_text.contains(&area.to_lowercase()))
        })
        .collect();

    if matched.is_empty() {
        providers.iter().collect()
    } else {
        matched
    }
}

/// Score every candidate and sort descending by value score.
///
/// Price scores are normalized within the candidate pool; when all resolved
/// prices are equal, every candidate gets the neutral maximum price score of
/// 1. The sort is stable, so equal scores keep their input order. The output
/// always has the same length as the input.
pub fn score_and_rank(
    candidates: &[&ServiceProvider],
    category: ServiceCategory,
    policy: &ScoringPolicy,
) -> Vec<RankedCandidate> {
    if candidates.is_empty() {
        return Vec::new();
    }

    let prices: Vec<f64> = candidates
        .iter()
        .map(|p| resolve_price(p, category, policy))
        .collect();

    let min_price = prices.iter().copied().fold(f64::INFINITY, f64::min);
    let max_price = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let spread = max_price - min_price;

    let mut ranked: Vec<RankedCandidate> = candidates
        .iter()
        .zip(prices)
        .map(|(provider, resolved_price)| {
            let price_score = if spread == 0.0 {
                1.0
            } else {
                (max_price - resolved_price) / spread
            };
            let rating_score = provider.rating / 5.0;
            let value_score =
                rating_score * policy.rating_weight + price_score * policy.price_weight;

            RankedCandidate {
                provider: (*provider).clone(),
                resolved_price,
                value_score,
            }
        })
        .collect();

    // Stable sort: ties retain input order.
    ranked.sort_by(|a, b| b.value_score.total_cmp(&a.value_score));

    ranked
}

fn resolve_price(provider: &ServiceProvider, category: ServiceCategory, policy: &ScoringPolicy) -> f64 {
    provider
        .price_table
        .get(&category)
        .or_else(|| provider.price_table.get(&ServiceCategory::General))
        .copied()
        .unwrap_or(policy.fallback_price)
}

/// Full pipeline: classify, filter, score, truncate.
///
/// `top_n` of `None` returns the whole ranked pool. An empty roster yields an
/// empty list; there is nothing to recommend and that is not an error.
pub fn recommend(
    providers: &[ServiceProvider],
    request: &ServiceRequest,
    property: Option<&PropertyLocation>,
    top_n: Option<usize>,
    policy: &ScoringPolicy,
) -> Vec<RankedCandidate> {
    if providers.is_empty() {
        return Vec::new();
    }

    let category = classify_service(request, policy);
    let candidates = filter_by_area(providers, property);
    let mut ranked = score_and_rank(&candidates, category, policy);

    if let Some(n) = top_n {
        ranked.truncate(n);
    }

    ranked
}
