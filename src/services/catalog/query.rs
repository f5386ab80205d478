use sea_orm::sea_query::{
    Expr, Func, Order, SelectStatement, SimpleExpr, SubQueryStatement,
};
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect, QueryTrait, Select,
};

use crate::entities::{brand, category, color, gender, product, product_variant, size};

use super::filter::{CatalogFilter, SortKey};

/// COALESCE(sale_price, price) over the variants table.
pub fn effective_price() -> SimpleExpr {
    Func::coalesce([
        Expr::col((product_variant::Entity, product_variant::Column::SalePrice)).into(),
        Expr::col((product_variant::Entity, product_variant::Column::Price)).into(),
    ])
    .into()
}

fn color_ids_by_slug(slugs: &[String]) -> SelectStatement {
    color::Entity::find()
        .select_only()
        .column(color::Column::Id)
        .filter(color::Column::Slug.is_in(slugs.iter().cloned()))
        .into_query()
}

fn size_ids_by_slug(slugs: &[String]) -> SelectStatement {
    size::Entity::find()
        .select_only()
        .column(size::Column::Id)
        .filter(size::Column::Slug.is_in(slugs.iter().cloned()))
        .into_query()
}

fn brand_ids_by_slug(slugs: &[String]) -> SelectStatement {
    brand::Entity::find()
        .select_only()
        .column(brand::Column::Id)
        .filter(brand::Column::Slug.is_in(slugs.iter().cloned()))
        .into_query()
}

fn category_ids_by_slug(slugs: &[String]) -> SelectStatement {
    category::Entity::find()
        .select_only()
        .column(category::Column::Id)
        .filter(category::Column::Slug.is_in(slugs.iter().cloned()))
        .into_query()
}

fn gender_ids_by_slug(slugs: &[String]) -> SelectStatement {
    gender::Entity::find()
        .select_only()
        .column(gender::Column::Id)
        .filter(gender::Column::Slug.is_in(slugs.iter().cloned()))
        .into_query()
}

/// Price predicate over the effective price: OR across the discrete
/// ranges, AND-composed with the explicit min/max bounds. `None` when no
/// price filter is active.
pub fn price_predicates(filter: &CatalogFilter) -> Option<Condition> {
    if !filter.has_price_filters() {
        return None;
    }

    let mut cond = Condition::all();
    if !filter.price_ranges.is_empty() {
        let mut any = Condition::any();
        for range in &filter.price_ranges {
            let mut band = Condition::all();
            if let Some(min) = range.min {
                band = band.add(Expr::expr(effective_price()).gte(Expr::val(min)));
            }
            if let Some(max) = range.max {
                band = band.add(Expr::expr(effective_price()).lte(Expr::val(max)));
            }
            any = any.add(band);
        }
        cond = cond.add(any);
    }
    if let Some(min) = filter.min_price {
        cond = cond.add(Expr::expr(effective_price()).gte(Expr::val(min)));
    }
    if let Some(max) = filter.max_price {
        cond = cond.add(Expr::expr(effective_price()).lte(Expr::val(max)));
    }
    Some(cond)
}

/// Conditions a single variant row must satisfy: listed (active, not
/// soft-deleted) plus every active variant-level filter. Color, size and
/// price apply to the same row, so only variants satisfying all of them
/// qualify.
pub fn variant_predicates(filter: &CatalogFilter) -> Condition {
    let mut cond = Condition::all()
        .add(product_variant::Column::IsActive.eq(true))
        .add(product_variant::Column::IsDeleted.eq(false));

    if !filter.colors.is_empty() {
        cond = cond.add(product_variant::Column::ColorId.in_subquery(color_ids_by_slug(&filter.colors)));
    }
    if !filter.sizes.is_empty() {
        cond = cond.add(product_variant::Column::SizeId.in_subquery(size_ids_by_slug(&filter.sizes)));
    }
    if let Some(price) = price_predicates(filter) {
        cond = cond.add(price);
    }
    cond
}

/// `SELECT product_id FROM product_variants WHERE <variant predicates>`.
pub fn matching_variant_ids(filter: &CatalogFilter) -> SelectStatement {
    product_variant::Entity::find()
        .select_only()
        .column(product_variant::Column::ProductId)
        .filter(variant_predicates(filter))
        .into_query()
}

/// Product-side conditions: published, text search, and the dimension
/// memberships. An empty slug set emits no predicate for that dimension.
fn product_side_predicates(filter: &CatalogFilter) -> Condition {
    let mut cond = Condition::all().add(product::Column::IsPublished.eq(true));

    if let Some(term) = &filter.search {
        let pattern = format!("%{}%", term.to_lowercase());
        cond = cond.add(
            Condition::any()
                .add(
                    Expr::expr(Func::lower(Expr::col((
                        product::Entity,
                        product::Column::Name,
                    ))))
                    .like(pattern.clone()),
                )
                .add(
                    Expr::expr(Func::lower(Expr::col((
                        product::Entity,
                        product::Column::Description,
                    ))))
                    .like(pattern),
                ),
        );
    }

    if !filter.genders.is_empty() {
        cond = cond.add(product::Column::GenderId.in_subquery(gender_ids_by_slug(&filter.genders)));
    }
    if !filter.brands.is_empty() {
        cond = cond.add(product::Column::BrandId.in_subquery(brand_ids_by_slug(&filter.brands)));
    }
    if !filter.categories.is_empty() {
        cond = cond
            .add(product::Column::CategoryId.in_subquery(category_ids_by_slug(&filter.categories)));
    }
    cond
}

/// Full catalog-mode predicate set. Membership in the variant subquery is
/// always required, so products without a qualifying variant never list.
pub fn product_predicates(filter: &CatalogFilter) -> Condition {
    product_side_predicates(filter).add(product::Column::Id.in_subquery(matching_variant_ids(filter)))
}

/// Full variant-mode predicate set: the variant row conditions plus
/// membership in the filtered product set.
pub fn variant_listing_predicates(filter: &CatalogFilter) -> Condition {
    let products = product::Entity::find()
        .select_only()
        .column(product::Column::Id)
        .filter(product_side_predicates(filter))
        .into_query();

    variant_predicates(filter).add(product_variant::Column::ProductId.in_subquery(products))
}

enum PriceAgg {
    Min,
    Max,
}

/// Correlated scalar subquery ranking a product by the MIN or MAX
/// effective price of its qualifying variants.
fn price_sort_expr(filter: &CatalogFilter, agg: PriceAgg) -> SimpleExpr {
    let agg_expr: SimpleExpr = match agg {
        PriceAgg::Min => Func::min(effective_price()).into(),
        PriceAgg::Max => Func::max(effective_price()).into(),
    };

    let mut sub = product_variant::Entity::find()
        .select_only()
        .column_as(agg_expr, "sort_price")
        .filter(variant_predicates(filter))
        .into_query();
    sub.and_where(
        Expr::col((product_variant::Entity, product_variant::Column::ProductId))
            .equals((product::Entity, product::Column::Id)),
    );

    SimpleExpr::SubQuery(None, Box::new(SubQueryStatement::SelectStatement(sub)))
}

/// Applies the requested sort to a catalog-mode select. Every ordering
/// tie-breaks on ascending id so pagination stays stable.
pub fn apply_product_order(
    select: Select<product::Entity>,
    filter: &CatalogFilter,
) -> Select<product::Entity> {
    let select = match filter.sort {
        SortKey::Newest => select.order_by_desc(product::Column::CreatedAt),
        SortKey::PriceAsc => select.order_by(price_sort_expr(filter, PriceAgg::Min), Order::Asc),
        SortKey::PriceDesc => select.order_by(price_sort_expr(filter, PriceAgg::Max), Order::Desc),
    };
    select.order_by_asc(product::Column::Id)
}

/// Applies the requested sort to a variant-mode select; price sorts use
/// the row's own effective price.
pub fn apply_variant_order(
    select: Select<product_variant::Entity>,
    sort: SortKey,
) -> Select<product_variant::Entity> {
    let select = match sort {
        SortKey::Newest => select.order_by_desc(product_variant::Column::CreatedAt),
        SortKey::PriceAsc => select.order_by(effective_price(), Order::Asc),
        SortKey::PriceDesc => select.order_by(effective_price(), Order::Desc),
    };
    select.order_by_asc(product_variant::Column::Id)
}
