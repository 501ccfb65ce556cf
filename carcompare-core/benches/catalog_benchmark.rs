//! Performance benchmarks for catalog loading, search and comparison
//! Target: a few milliseconds per search on a catalog of ~10k trims

use carcompare_core::catalog::{
    Brand, CatalogStore, CatalogTree, Generation, Model, TechnicalDetails, Trim,
};
use carcompare_core::compare::{compare, MAX_COMPARED_TRIMS};
use carcompare_core::query::{search, search_tree, SearchFilters};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const TRANSMISSIONS: [&str; 4] = ["Automatic", "Manual", "CVT", "e-CVT"];
const FUEL_TYPES: [&str; 4] = ["Petrol", "Diesel", "Hybrid", "Plug-in Hybrid"];
const BODY_TYPES: [&str; 4] = ["Sedan", "SUV", "Hatchback", "Wagon"];

/// 20 brands x 10 models x 5 generations x 10 trims
fn generate_catalog() -> CatalogTree {
    let mut next_model = 0;
    let mut next_generation = 0;
    let mut next_trim = 0;

    let brands = (1..=20)
        .map(|brand_id| Brand {
            id: brand_id,
            name: format!("Brand {brand_id}"),
            models: (0..10)
                .map(|m| {
                    next_model += 1;
                    let model_id = next_model;
                    Model {
                        id: model_id,
                        name: format!("Model {model_id}"),
                        brand_id,
                        body_type: Some(BODY_TYPES[m % BODY_TYPES.len()].to_string()),
                        generations: (0..5)
                            .map(|g| {
                                next_generation += 1;
                                let generation_id = next_generation;
                                let year_from = 1990 + (g as i32) * 7;
                                Generation {
                                    id: generation_id,
                                    name: format!("Gen {generation_id}"),
                                    model_id,
                                    year_from,
                                    year_to: year_from + 6,
                                    photo_url: None,
                                    trims: (0..10)
                                        .map(|t| {
                                            next_trim += 1;
                                            generate_trim(next_trim, generation_id, t)
                                        })
                                        .collect(),
                                }
                            })
                            .collect(),
                    }
                })
                .collect(),
        })
        .collect();

    CatalogTree::new(brands)
}

fn generate_trim(id: i32, generation_id: i32, index: usize) -> Trim {
    Trim {
        id,
        name: format!("Trim {id}"),
        generation_id,
        transmission_type: Some(TRANSMISSIONS[index % TRANSMISSIONS.len()].to_string()),
        doors_count: Some(4),
        seats_count: Some(5),
        technical_details: Some(TechnicalDetails {
            max_speed: Some(160 + (id % 90)),
            acceleration_0_to_100: Some(5.0 + f64::from(id % 70) / 10.0),
            fuel_type: Some(FUEL_TYPES[index % FUEL_TYPES.len()].to_string()),
            power: Some(90 + (id % 300)),
            torque: Some(150 + (id % 400)),
            fuel_consumption_mixed: Some(3.0 + f64::from(id % 60) / 10.0),
            ..Default::default()
        }),
    }
}

fn benchmark_load(c: &mut Criterion) {
    let json = serde_json::to_string(generate_catalog().brands()).unwrap();

    c.bench_function("load_from_str", |b| {
        let store = CatalogStore::new();
        b.iter(|| {
            store.load_from_str(black_box(&json)).unwrap();
        });
    });
}

fn benchmark_search(c: &mut Criterion) {
    let tree = generate_catalog();

    c.bench_function("search_unfiltered", |b| {
        let filters = SearchFilters::new();
        b.iter(|| search(black_box(&tree), black_box(&filters)));
    });

    c.bench_function("search_filtered", |b| {
        let filters = SearchFilters::new()
            .brand("brand 1")
            .body_type("suv")
            .min_year(2000)
            .transmission("automatic")
            .fuel_type("petrol");
        b.iter(|| search(black_box(&tree), black_box(&filters)));
    });

    c.bench_function("search_tree_filtered", |b| {
        let filters = SearchFilters::new().min_year(2000).transmission("cvt");
        b.iter(|| search_tree(black_box(&tree), black_box(&filters)));
    });
}

fn benchmark_compare(c: &mut Criterion) {
    let tree = generate_catalog();

    c.bench_function("compare_four_trims", |b| {
        let ids = [17, 4_203, 8_811, 9_999];
        b.iter(|| compare(black_box(&tree), black_box(&ids), MAX_COMPARED_TRIMS).unwrap());
    });
}

criterion_group!(benches, benchmark_load, benchmark_search, benchmark_compare);
criterion_main!(benches);
