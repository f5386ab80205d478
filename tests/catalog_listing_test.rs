mod common;

use chrono::{Duration, Utc};
use common::*;
use rust_decimal_macros::dec;
use storefront_api::services::catalog::CatalogFilter;

#[tokio::test]
async fn price_band_keeps_products_with_any_qualifying_variant() {
    let app = TestApp::new().await;

    // P1 has variants at $50 and $70; the $70 one must not disqualify it.
    let p1 = insert_product(&app, "Trail Runner").await;
    insert_variant(&app, p1, "P1-A", dec!(50), None, None, None).await;
    insert_variant(&app, p1, "P1-B", dec!(70), None, None, None).await;

    let p2 = insert_product(&app, "Road Racer").await;
    insert_variant(&app, p2, "P2-A", dec!(60), None, None, None).await;

    let filter = CatalogFilter::from_query("price=0-65&sort=price_asc");
    let listing = app.catalog().list_products(&filter).await.expect("listing");

    assert_eq!(listing.total_count, 2);
    assert_eq!(listing.items.len(), 2);
    assert_eq!(listing.items[0].id, p1);
    assert_eq!(listing.items[0].min_price, Some(50.0));
    assert_eq!(listing.items[1].id, p2);
    assert_eq!(listing.items[1].min_price, Some(60.0));
}

#[tokio::test]
async fn pagination_returns_remainder_on_last_page() {
    let app = TestApp::new().await;

    for i in 0..25 {
        let product = insert_product(&app, &format!("Product {i}")).await;
        insert_variant(&app, product, &format!("SKU-{i}"), dec!(30), None, None, None).await;
    }

    let filter = CatalogFilter::from_query("limit=10&page=3");
    let listing = app.catalog().list_products(&filter).await.expect("listing");

    assert_eq!(listing.total_count, 25);
    assert_eq!(listing.items.len(), 5);
}

#[tokio::test]
async fn total_count_bounds_hold_for_every_page() {
    let app = TestApp::new().await;

    for i in 0..7 {
        let product = insert_product(&app, &format!("Item {i}")).await;
        insert_variant(&app, product, &format!("IT-{i}"), dec!(15), None, None, None).await;
    }

    for page in 1..=4 {
        let filter = CatalogFilter::from_query(&format!("limit=3&page={page}"));
        let listing = app.catalog().list_products(&filter).await.expect("listing");
        assert!(listing.total_count >= listing.items.len() as u64);
        assert!(listing.items.len() <= 3);
    }
}

#[tokio::test]
async fn size_and_color_must_match_on_one_variant() {
    let app = TestApp::new().await;

    let color_one = insert_color(&app, "Crimson", "crimson").await;
    let color_two = insert_color(&app, "Navy", "navy").await;
    let size_s = insert_size(&app, "S", "s", 1).await;
    let size_t = insert_size(&app, "T", "t", 2).await;

    // V1 is (S, crimson), V2 is (T, navy): no single variant is (S, navy).
    let product = insert_product(&app, "Split Pair").await;
    insert_variant(&app, product, "SP-1", dec!(40), None, Some(color_one), Some(size_s)).await;
    insert_variant(&app, product, "SP-2", dec!(40), None, Some(color_two), Some(size_t)).await;

    let excluded = CatalogFilter::from_query("size=s&color=navy");
    let listing = app.catalog().list_products(&excluded).await.expect("listing");
    assert_eq!(listing.total_count, 0);
    assert!(listing.items.is_empty());

    // Either constraint alone matches.
    let by_size = CatalogFilter::from_query("size=s");
    assert_eq!(app.catalog().list_products(&by_size).await.expect("listing").total_count, 1);
    let by_color = CatalogFilter::from_query("color=navy");
    assert_eq!(app.catalog().list_products(&by_color).await.expect("listing").total_count, 1);
}

#[tokio::test]
async fn color_filter_resolves_that_colors_image_even_without_primary() {
    let app = TestApp::new().await;

    let color_a = insert_color(&app, "Alpine", "alpine").await;
    let color_b = insert_color(&app, "Basalt", "basalt").await;

    let product = insert_product(&app, "Two Tone").await;
    insert_variant(&app, product, "TT-A", dec!(90), None, Some(color_a), None).await;
    insert_variant(&app, product, "TT-B", dec!(90), None, Some(color_b), None).await;
    insert_image(&app, product, Some(color_a), "alpine-primary.jpg", 0, true).await;
    insert_image(&app, product, Some(color_b), "basalt-plain.jpg", 1, false).await;

    let filter = CatalogFilter::from_query("color=basalt");
    let listing = app.catalog().list_products(&filter).await.expect("listing");

    assert_eq!(listing.items.len(), 1);
    assert_eq!(listing.items[0].image_url.as_deref(), Some("basalt-plain.jpg"));
}

#[tokio::test]
async fn unfiltered_listing_uses_default_variant_color_for_image() {
    let app = TestApp::new().await;

    let color_a = insert_color(&app, "Alpine", "alpine").await;

    let product = insert_product(&app, "Single Tone").await;
    let default_variant =
        insert_variant(&app, product, "ST-A", dec!(75), None, Some(color_a), None).await;
    set_default_variant(&app, product, default_variant).await;
    insert_image(&app, product, Some(color_a), "alpine-primary.jpg", 0, true).await;
    insert_image(&app, product, Some(color_a), "alpine-alt.jpg", 1, false).await;

    let listing = app
        .catalog()
        .list_products(&CatalogFilter::from_query(""))
        .await
        .expect("listing");

    assert_eq!(listing.items.len(), 1);
    assert_eq!(
        listing.items[0].image_url.as_deref(),
        Some("alpine-primary.jpg")
    );
    assert_eq!(listing.items[0].default_variant_id, Some(default_variant));
}

#[tokio::test]
async fn imageless_product_lists_with_absent_image() {
    let app = TestApp::new().await;

    let product = insert_product(&app, "Bare").await;
    insert_variant(&app, product, "BARE-1", dec!(20), None, None, None).await;

    let listing = app
        .catalog()
        .list_products(&CatalogFilter::from_query(""))
        .await
        .expect("listing");

    assert_eq!(listing.items.len(), 1);
    assert!(listing.items[0].image_url.is_none());
}

#[tokio::test]
async fn price_sort_invariants_hold_in_both_directions() {
    let app = TestApp::new().await;

    for (i, price) in [dec!(80), dec!(20), dec!(55), dec!(35)].iter().enumerate() {
        let product = insert_product(&app, &format!("Sorted {i}")).await;
        insert_variant(&app, product, &format!("SRT-{i}"), *price, None, None, None).await;
    }

    let asc = app
        .catalog()
        .list_products(&CatalogFilter::from_query("sort=price_asc"))
        .await
        .expect("listing");
    for pair in asc.items.windows(2) {
        assert!(pair[0].min_price <= pair[1].min_price);
    }

    let desc = app
        .catalog()
        .list_products(&CatalogFilter::from_query("sort=price_desc"))
        .await
        .expect("listing");
    for pair in desc.items.windows(2) {
        assert!(pair[0].max_price >= pair[1].max_price);
    }
}

#[tokio::test]
async fn newest_sort_orders_by_creation_time_descending() {
    let app = TestApp::new().await;

    let base = Utc::now();
    let older = insert_product_at(&app, "Older", base - Duration::days(2)).await;
    let newer = insert_product_at(&app, "Newer", base).await;
    insert_variant(&app, older, "OLD-1", dec!(10), None, None, None).await;
    insert_variant(&app, newer, "NEW-1", dec!(10), None, None, None).await;

    let listing = app
        .catalog()
        .list_products(&CatalogFilter::from_query(""))
        .await
        .expect("listing");

    assert_eq!(listing.items[0].id, newer);
    assert_eq!(listing.items[1].id, older);
}

#[tokio::test]
async fn unpublished_and_variantless_products_never_list() {
    let app = TestApp::new().await;

    let hidden =
        insert_product_full(&app, "Hidden", None, None, None, false, Utc::now()).await;
    insert_variant(&app, hidden, "HID-1", dec!(10), None, None, None).await;

    // Published but with no listed variant: one inactive, one soft-deleted.
    let bare = insert_product(&app, "No Stock Keeping Units").await;
    insert_variant_flags(&app, bare, "NSK-1", dec!(10), None, None, None, false, false).await;
    insert_variant_flags(&app, bare, "NSK-2", dec!(10), None, None, None, true, true).await;

    let listing = app
        .catalog()
        .list_products(&CatalogFilter::from_query(""))
        .await
        .expect("listing");

    assert_eq!(listing.total_count, 0);
    assert!(listing.items.is_empty());
}

#[tokio::test]
async fn soft_deleted_variants_are_excluded_from_aggregates() {
    let app = TestApp::new().await;

    let product = insert_product(&app, "Partial").await;
    insert_variant(&app, product, "PRT-1", dec!(50), None, None, None).await;
    insert_variant_flags(&app, product, "PRT-2", dec!(10), None, None, None, true, true).await;

    let listing = app
        .catalog()
        .list_products(&CatalogFilter::from_query(""))
        .await
        .expect("listing");

    assert_eq!(listing.items.len(), 1);
    assert_eq!(listing.items[0].min_price, Some(50.0));
    assert_eq!(listing.items[0].max_price, Some(50.0));
}

#[tokio::test]
async fn sale_price_drives_effective_price_filtering_and_aggregation() {
    let app = TestApp::new().await;

    // Listed at $100 but on sale for $45: a 0-50 band must keep it.
    let product = insert_product(&app, "On Sale").await;
    insert_variant(&app, product, "SAL-1", dec!(100), Some(dec!(45)), None, None).await;

    let filter = CatalogFilter::from_query("price=0-50");
    let listing = app.catalog().list_products(&filter).await.expect("listing");

    assert_eq!(listing.total_count, 1);
    assert_eq!(listing.items[0].min_price, Some(45.0));
}

#[tokio::test]
async fn dimension_filters_restrict_by_slug_membership() {
    let app = TestApp::new().await;

    let acme = insert_brand(&app, "Acme", "acme").await;
    let zenith = insert_brand(&app, "Zenith", "zenith").await;
    let running = insert_category(&app, "Running", "running").await;
    let women = insert_gender(&app, "Women", "women").await;

    let match_all = insert_product_full(
        &app,
        "Acme Runner",
        Some(acme),
        Some(running),
        Some(women),
        true,
        Utc::now(),
    )
    .await;
    insert_variant(&app, match_all, "AR-1", dec!(65), None, None, None).await;

    let other_brand = insert_product_full(
        &app,
        "Zenith Runner",
        Some(zenith),
        Some(running),
        Some(women),
        true,
        Utc::now(),
    )
    .await;
    insert_variant(&app, other_brand, "ZR-1", dec!(65), None, None, None).await;

    let filter = CatalogFilter::from_query("brand=acme&category=running&gender=women");
    let listing = app.catalog().list_products(&filter).await.expect("listing");

    assert_eq!(listing.total_count, 1);
    assert_eq!(listing.items[0].id, match_all);
    assert_eq!(listing.items[0].subtitle.as_deref(), Some("Women Shoes"));

    // Both brands qualify when both slugs are selected.
    let both = CatalogFilter::from_query("brand=acme&brand=zenith");
    assert_eq!(app.catalog().list_products(&both).await.expect("listing").total_count, 2);
}

#[tokio::test]
async fn search_matches_name_and_description_case_insensitively() {
    let app = TestApp::new().await;

    let named = insert_product(&app, "Glacier Boot").await;
    insert_variant(&app, named, "GB-1", dec!(120), None, None, None).await;

    let other = insert_product(&app, "Desert Sandal").await;
    insert_variant(&app, other, "DS-1", dec!(30), None, None, None).await;

    let listing = app
        .catalog()
        .list_products(&CatalogFilter::from_query("search=gLaCiEr"))
        .await
        .expect("listing");

    assert_eq!(listing.total_count, 1);
    assert_eq!(listing.items[0].id, named);
}

#[tokio::test]
async fn identical_filters_give_identical_results() {
    let app = TestApp::new().await;

    for i in 0..4 {
        let product = insert_product(&app, &format!("Repeat {i}")).await;
        insert_variant(&app, product, &format!("RPT-{i}"), dec!(25), None, None, None).await;
    }

    let filter = CatalogFilter::from_query("sort=price_asc&limit=3");
    let first = app.catalog().list_products(&filter).await.expect("listing");
    let second = app.catalog().list_products(&filter).await.expect("listing");

    assert_eq!(first.total_count, second.total_count);
    let first_ids: Vec<_> = first.items.iter().map(|i| i.id).collect();
    let second_ids: Vec<_> = second.items.iter().map(|i| i.id).collect();
    assert_eq!(first_ids, second_ids);
}

#[tokio::test]
async fn empty_catalog_returns_empty_listing() {
    let app = TestApp::new().await;

    let listing = app
        .catalog()
        .list_products(&CatalogFilter::from_query("color=nonexistent"))
        .await
        .expect("listing");

    assert_eq!(listing.total_count, 0);
    assert!(listing.items.is_empty());
}
