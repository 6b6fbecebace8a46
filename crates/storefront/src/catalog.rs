//! Static product catalog.
//!
//! The catalog is built once at startup and never changes while the process
//! runs. Product ids are fixed strings so cart lines persisted by a previous
//! run still merge with the same products.

use chrono::{DateTime, Duration, TimeZone, Utc};
use shopnext_core::{Category, CategoryId, Price, Product, ProductId, Specification};

/// Read-only product and category listing.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    categories: Vec<Category>,
}

impl Catalog {
    /// Create a catalog from explicit records.
    #[must_use]
    pub const fn new(products: Vec<Product>, categories: Vec<Category>) -> Self {
        Self {
            products,
            categories,
        }
    }

    /// The built-in demo catalog: eight products in four categories.
    #[must_use]
    pub fn fixture() -> Self {
        let released = Utc
            .with_ymd_and_hms(2026, 9, 1, 9, 0, 0)
            .single()
            .unwrap_or_default();

        // Newer products first, so "newest" ordering equals fixture order.
        let products = PRODUCT_SEEDS
            .iter()
            .zip(0_i64..)
            .map(|(seed, age)| seed.build(released - Duration::days(age)))
            .collect();

        let categories = CATEGORY_SEEDS
            .iter()
            .map(|&(id, name, description, image_url)| Category {
                id: CategoryId::new(id),
                name: name.to_string(),
                slug: id.to_string(),
                description: Some(description.to_string()),
                image_url: Some(image_url.to_string()),
            })
            .collect();

        Self::new(products, categories)
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// All categories in catalog order.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Look up a product by id.
    #[must_use]
    pub fn find_by_id(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Look up a product by its URL handle.
    #[must_use]
    pub fn find_by_slug(&self, slug: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.slug == slug)
    }

    /// Up to `limit` featured products in catalog order.
    pub fn featured(&self, limit: usize) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| p.featured).take(limit)
    }
}

// =============================================================================
// Fixture Data
// =============================================================================

struct ProductSeed {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    cents: i64,
    images: &'static [&'static str],
    category: &'static str,
    stock: u32,
    featured: bool,
    slug: &'static str,
    tags: &'static [&'static str],
    specifications: &'static [(&'static str, &'static str)],
}

impl ProductSeed {
    fn build(&self, created_at: DateTime<Utc>) -> Product {
        let images: Vec<String> = self.images.iter().map(|s| (*s).to_string()).collect();

        Product {
            id: ProductId::new(self.id),
            name: self.name.to_string(),
            description: self.description.to_string(),
            price: Price::from_cents(self.cents),
            image_url: images.first().cloned().unwrap_or_default(),
            images,
            category: self.category.to_string(),
            stock: self.stock,
            featured: self.featured,
            slug: self.slug.to_string(),
            created_at,
            updated_at: created_at,
            tags: self.tags.iter().map(|s| (*s).to_string()).collect(),
            specifications: self
                .specifications
                .iter()
                .map(|&(name, value)| Specification::new(name, value))
                .collect(),
        }
    }
}

const PRODUCT_SEEDS: &[ProductSeed] = &[
    ProductSeed {
        id: "prod-001",
        name: "Wireless Bluetooth Headphones",
        description: "Premium quality wireless headphones with noise cancellation and 30-hour battery life. Perfect for music lovers and professionals.",
        cents: 19_999,
        images: &[
            "https://images.unsplash.com/photo-1505740420928-5e560c06d30e?w=500&h=500&fit=crop",
            "https://images.unsplash.com/photo-1484704849700-f032a568e944?w=500&h=500&fit=crop",
            "https://images.unsplash.com/photo-1546435770-a3e426bf472b?w=500&h=500&fit=crop",
        ],
        category: "Electronics",
        stock: 25,
        featured: true,
        slug: "wireless-bluetooth-headphones",
        tags: &["wireless", "bluetooth", "headphones", "audio"],
        specifications: &[
            ("Battery Life", "30 hours"),
            ("Connectivity", "Bluetooth 5.0"),
            ("Weight", "280g"),
            ("Color", "Black"),
        ],
    },
    ProductSeed {
        id: "prod-002",
        name: "Smart Watch Series X",
        description: "Advanced smartwatch with health monitoring, GPS tracking, and 7-day battery life. Compatible with iOS and Android.",
        cents: 29_999,
        images: &[
            "https://images.unsplash.com/photo-1523275335684-37898b6baf30?w=500&h=500&fit=crop",
            "https://images.unsplash.com/photo-1544117519-31a4b719223d?w=500&h=500&fit=crop",
        ],
        category: "Electronics",
        stock: 15,
        featured: true,
        slug: "smart-watch-series-x",
        tags: &["smartwatch", "fitness", "health", "gps"],
        specifications: &[
            ("Display", "1.9\" AMOLED"),
            ("Battery Life", "7 days"),
            ("Water Resistance", "5ATM"),
            ("Sensors", "Heart Rate, GPS, Accelerometer"),
        ],
    },
    ProductSeed {
        id: "prod-003",
        name: "Premium Coffee Maker",
        description: "Professional-grade coffee maker with built-in grinder and programmable settings. Makes perfect coffee every time.",
        cents: 15_999,
        images: &[
            "https://images.unsplash.com/photo-1495474472287-4d71bcdd2085?w=500&h=500&fit=crop",
        ],
        category: "Home & Kitchen",
        stock: 8,
        featured: false,
        slug: "premium-coffee-maker",
        tags: &["coffee", "kitchen", "appliance", "grinder"],
        specifications: &[
            ("Capacity", "12 cups"),
            ("Material", "Stainless Steel"),
            ("Features", "Built-in Grinder, Timer"),
            ("Warranty", "2 years"),
        ],
    },
    ProductSeed {
        id: "prod-004",
        name: "Organic Cotton T-Shirt",
        description: "Comfortable and sustainable organic cotton t-shirt. Available in multiple colors and sizes.",
        cents: 2_999,
        images: &[
            "https://images.unsplash.com/photo-1521572163474-6864f9cf17ab?w=500&h=500&fit=crop",
        ],
        category: "Clothing",
        stock: 50,
        featured: false,
        slug: "organic-cotton-t-shirt",
        tags: &["clothing", "organic", "cotton", "sustainable"],
        specifications: &[
            ("Material", "100% Organic Cotton"),
            ("Fit", "Regular"),
            ("Care", "Machine Washable"),
            ("Origin", "Made in USA"),
        ],
    },
    ProductSeed {
        id: "prod-005",
        name: "Wireless Phone Charger",
        description: "Fast wireless charging pad compatible with all Qi-enabled devices. Includes AC adapter and cable.",
        cents: 3_999,
        images: &[
            "https://images.unsplash.com/photo-1586953208448-b95a79798f07?w=500&h=500&fit=crop",
        ],
        category: "Electronics",
        stock: 30,
        featured: false,
        slug: "wireless-phone-charger",
        tags: &["wireless", "charger", "phone", "qi"],
        specifications: &[
            ("Output", "15W Fast Charging"),
            ("Compatibility", "Qi-enabled devices"),
            ("Input", "USB-C"),
            ("Material", "Aluminum"),
        ],
    },
    ProductSeed {
        id: "prod-006",
        name: "Gaming Mechanical Keyboard",
        description: "Professional gaming keyboard with RGB lighting, mechanical switches, and customizable keys.",
        cents: 12_999,
        images: &[
            "https://images.unsplash.com/photo-1541140532154-b024d705b90a?w=500&h=500&fit=crop",
        ],
        category: "Electronics",
        stock: 12,
        featured: true,
        slug: "gaming-mechanical-keyboard",
        tags: &["gaming", "keyboard", "mechanical", "rgb"],
        specifications: &[
            ("Switch Type", "Cherry MX Blue"),
            ("Backlighting", "RGB"),
            ("Connection", "USB-C"),
            ("Layout", "Full Size"),
        ],
    },
    ProductSeed {
        id: "prod-007",
        name: "Yoga Mat Premium",
        description: "High-quality non-slip yoga mat made from eco-friendly materials. Perfect for yoga, pilates, and fitness.",
        cents: 4_999,
        images: &[
            "https://images.unsplash.com/photo-1544367567-0f2fcb009e0b?w=500&h=500&fit=crop",
        ],
        category: "Sports & Fitness",
        stock: 20,
        featured: false,
        slug: "yoga-mat-premium",
        tags: &["yoga", "fitness", "mat", "exercise"],
        specifications: &[
            ("Thickness", "6mm"),
            ("Material", "TPE (Eco-friendly)"),
            ("Size", "183cm x 61cm"),
            ("Weight", "1.2kg"),
        ],
    },
    ProductSeed {
        id: "prod-008",
        name: "Stainless Steel Water Bottle",
        description: "Insulated stainless steel water bottle keeps drinks cold for 24 hours and hot for 12 hours.",
        cents: 2_499,
        images: &[
            "https://images.unsplash.com/photo-1602143407151-7111542de6e8?w=500&h=500&fit=crop",
        ],
        category: "Sports & Fitness",
        stock: 35,
        featured: false,
        slug: "stainless-steel-water-bottle",
        tags: &["water", "bottle", "stainless", "insulated"],
        specifications: &[
            ("Capacity", "750ml"),
            ("Material", "304 Stainless Steel"),
            ("Insulation", "Double Wall Vacuum"),
            ("Lid Type", "Leak-proof Sport Cap"),
        ],
    },
];

/// `(id/slug, name, description, image)`
const CATEGORY_SEEDS: &[(&str, &str, &str, &str)] = &[
    (
        "electronics",
        "Electronics",
        "Latest gadgets and electronic devices",
        "https://images.unsplash.com/photo-1498049794561-7780e7231661?w=400&h=300&fit=crop",
    ),
    (
        "clothing",
        "Clothing",
        "Fashion and apparel for everyone",
        "https://images.unsplash.com/photo-1441986300917-64674bd600d8?w=400&h=300&fit=crop",
    ),
    (
        "home-kitchen",
        "Home & Kitchen",
        "Everything for your home and kitchen",
        "https://images.unsplash.com/photo-1556909114-f6e7ad7d3136?w=400&h=300&fit=crop",
    ),
    (
        "sports-fitness",
        "Sports & Fitness",
        "Gear for your active lifestyle",
        "https://images.unsplash.com/photo-1571019613454-1cb2f99b2d8b?w=400&h=300&fit=crop",
    ),
];
