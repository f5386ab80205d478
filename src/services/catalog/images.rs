use std::collections::HashMap;

use uuid::Uuid;

use crate::entities::product_image;

/// Groups a page's image rows by owning product.
pub fn index_by_product(
    images: Vec<product_image::Model>,
) -> HashMap<Uuid, Vec<product_image::Model>> {
    let mut index: HashMap<Uuid, Vec<product_image::Model>> = HashMap::new();
    for image in images {
        index.entry(image.product_id).or_default().push(image);
    }
    index
}

/// Picks one representative image for a product.
///
/// Two ranked candidate scopes, most specific first: images whose color is
/// in `preferred_colors`, then all of the product's images. Within a scope
/// the best candidate is primary-first, then lowest sort order, with the id
/// as a final deterministic tie-break. Returns `None` only when the
/// product has no images at all; callers supply the placeholder.
pub fn resolve_image<'a>(
    images: &'a [product_image::Model],
    preferred_colors: &[Uuid],
) -> Option<&'a product_image::Model> {
    if !preferred_colors.is_empty() {
        let color_scoped = best_ranked(images.iter().filter(|image| {
            image
                .color_id
                .map(|color| preferred_colors.contains(&color))
                .unwrap_or(false)
        }));
        if color_scoped.is_some() {
            return color_scoped;
        }
    }
    best_ranked(images.iter())
}

fn best_ranked<'a, I>(candidates: I) -> Option<&'a product_image::Model>
where
    I: Iterator<Item = &'a product_image::Model>,
{
    candidates.min_by_key(|image| (!image.is_primary, image.sort_order, image.id))
}
