#![allow(clippy::unwrap_used, clippy::expect_used)]

use recipe_protocol::protocol::recipe::{MultiRecipe, RecipeHeader, ShapelessRecipe, SmithingTrimRecipe};
use recipe_protocol::utils::metrics::Metrics;
use recipe_protocol::utils::SequentialIds;
use recipe_protocol::{Ingredient, Item, Recipe, RecipeCodec, RecipeCollection};
use std::sync::Arc;
use std::thread;
use uuid::Uuid;

fn catalogue(size: u64) -> RecipeCollection {
    (1..=size)
        .map(|n| match n % 3 {
            0 => Recipe::Multi(MultiRecipe {
                header: RecipeHeader::new(Uuid::from_u64_pair(0, n)),
                unique_id: n as i32,
            }),
            1 => Recipe::Shapeless(ShapelessRecipe {
                header: RecipeHeader::new(Uuid::from_u64_pair(1, n)).with_block("crafting_table"),
                unique_id: n as i32,
                inputs: vec![Ingredient::item(5, 0, 1), Ingredient::tag("minecraft:planks", 2)],
                results: vec![Item::new(280, 0, 4)],
            }),
            _ => Recipe::SmithingTrim(SmithingTrimRecipe {
                header: RecipeHeader::new(Uuid::nil()).with_block("smithing_table"),
                unique_id: -(n as i32),
                template: Ingredient::any(),
                input: Ingredient::tag("minecraft:trimmable_armor", 1),
                addition: Ingredient::tag("minecraft:trim_materials", 1),
            }),
        })
        .collect()
}

#[test]
fn concurrent_encode_shared_collection() {
    let codec = Arc::new(RecipeCodec::default());
    let recipes = Arc::new(catalogue(300));
    let expected = codec.encode_collection(&recipes).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let codec = Arc::clone(&codec);
            let recipes = Arc::clone(&recipes);
            let expected = expected.clone();
            thread::spawn(move || {
                for _ in 0..50 {
                    assert_eq!(codec.encode_collection(&recipes).unwrap(), expected);
                }
                codec.encode_collection(&recipes).unwrap()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().expect("encoder thread panicked"), expected);
    }
}

#[test]
fn concurrent_decode_draws_unique_ids() {
    let codec = Arc::new(RecipeCodec::default().with_id_generator(SequentialIds::new()));
    let bytes = codec.encode_collection(&catalogue(90)).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let codec = Arc::clone(&codec);
            let bytes = bytes.clone();
            thread::spawn(move || {
                let decoded = codec.decode_collection(&bytes).unwrap();
                decoded
                    .iter()
                    .filter(|r| !r.has_wire_id())
                    .map(Recipe::id)
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut ids: Vec<Uuid> = handles
        .into_iter()
        .flat_map(|h| h.join().expect("decoder thread panicked"))
        .collect();
    let total = ids.len();
    ids.sort();
    ids.dedup();

    assert_eq!(total, 4 * 30);
    assert_eq!(ids.len(), total, "generated ids must never repeat across threads");
}

#[test]
fn concurrent_metrics_are_consistent() {
    let metrics = Arc::new(Metrics::new());
    let codec = Arc::new(RecipeCodec::default().with_metrics(Arc::clone(&metrics)));
    let recipes = Arc::new(catalogue(10));

    let handles: Vec<_> = (0..6)
        .map(|_| {
            let codec = Arc::clone(&codec);
            let recipes = Arc::clone(&recipes);
            thread::spawn(move || {
                for _ in 0..20 {
                    let bytes = codec.encode_collection(&recipes).unwrap();
                    codec.decode_collection(&bytes).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let snapshot = metrics.snapshot();
    assert_eq!(snapshot.collections_encoded, 120);
    assert_eq!(snapshot.collections_decoded, 120);
    assert_eq!(snapshot.recipes_decoded, 1200);
    assert_eq!(snapshot.decode_errors, 0);
}
