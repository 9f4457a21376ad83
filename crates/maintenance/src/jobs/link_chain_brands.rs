use food_discovery::store::{ChainOutletRepo, Store};
use model::{outlet::ChainBrand, WithId};
use serde::Serialize;
use utility::{edit_distance::edit_distance, normalize::extract_core_name};

use super::{print_report, Result};

/// Above this edit distance a near-miss is noise, not a suggestion.
const SUGGESTION_DISTANCE_MAX: usize = 2;

#[derive(Debug)]
enum LinkPlan<'a> {
    Link(&'a WithId<ChainBrand>),
    Suggest {
        brand: &'a WithId<ChainBrand>,
        distance: usize,
    },
    NoMatch,
}

fn plan_link<'a>(outlet_name: &str, brands: &'a [WithId<ChainBrand>]) -> LinkPlan<'a> {
    let outlet_core = extract_core_name(outlet_name);
    let mut nearest: Option<(&'a WithId<ChainBrand>, usize)> = None;
    for brand in brands {
        let brand_core = extract_core_name(&brand.content.name);
        if brand_core == outlet_core {
            return LinkPlan::Link(brand);
        }
        let distance = edit_distance(&outlet_core, &brand_core);
        if nearest.map_or(true, |(_, best)| distance < best) {
            nearest = Some((brand, distance));
        }
    }
    match nearest {
        Some((brand, distance)) if distance <= SUGGESTION_DISTANCE_MAX => {
            LinkPlan::Suggest { brand, distance }
        }
        _ => LinkPlan::NoMatch,
    }
}

#[derive(Debug, Clone, Serialize)]
struct LinkReport {
    linked_outlets: usize,
    suggested_matches: usize,
    unmatched_outlets: usize,
}

pub async fn run<S: Store>(store: &S) -> Result<()> {
    log::info!("linking chain outlets to brands...");

    let mut handle = store.auto();
    let brands = handle.chain_brands().await?;
    let outlets = handle.unlinked_chain_outlets().await?;

    let mut report = LinkReport {
        linked_outlets: 0,
        suggested_matches: 0,
        unmatched_outlets: 0,
    };
    for outlet in outlets {
        match plan_link(&outlet.content.name, &brands) {
            LinkPlan::Link(brand) => {
                handle.link_outlet_to_brand(&outlet.id, &brand.id).await?;
                report.linked_outlets += 1;
            }
            LinkPlan::Suggest { brand, distance } => {
                log::info!(
                    "outlet {:?} resembles brand {:?} (edit distance {distance}), not linking",
                    outlet.content.name,
                    brand.content.name
                );
                report.suggested_matches += 1;
            }
            LinkPlan::NoMatch => report.unmatched_outlets += 1,
        }
    }

    print_report("link", &report);
    Ok(())
}

#[cfg(test)]
mod tests {
    use model::ExampleData;
    use utility::id::Id;

    use super::*;

    fn brand(id: &str, name: &str) -> WithId<ChainBrand> {
        let mut brand = ChainBrand::example_data();
        brand.name = name.to_owned();
        WithId::new(Id::new(id.to_owned()), brand)
    }

    #[test]
    fn equal_core_names_link() {
        let brands = vec![brand("ya-kun", "Ya Kun Kaya Toast"), brand("koi", "KOI")];
        match plan_link("Ya Kun Kaya Toast Outlet", &brands) {
            LinkPlan::Link(matched) => assert_eq!(matched.id, Id::new("ya-kun".to_owned())),
            other => panic!("expected a link, got {other:?}"),
        }
    }

    #[test]
    fn close_names_only_suggest() {
        let brands = vec![brand("ya-kun", "Ya Kun Kaya Toast")];
        match plan_link("Ya Kun Kya Toast", &brands) {
            LinkPlan::Suggest { brand, distance } => {
                assert_eq!(brand.id, Id::new("ya-kun".to_owned()));
                assert_eq!(distance, 1);
            }
            other => panic!("expected a suggestion, got {other:?}"),
        }
    }

    #[test]
    fn distant_names_do_not_match() {
        let brands = vec![brand("ya-kun", "Ya Kun Kaya Toast")];
        assert!(matches!(
            plan_link("Stuff'd", &brands),
            LinkPlan::NoMatch
        ));
    }

    #[test]
    fn no_brands_means_no_match() {
        assert!(matches!(plan_link("Toast Box", &[]), LinkPlan::NoMatch));
    }
}
