//! Food suggestions
//!
//! A fixed rule table mapping the dog's life stage, size and health need to a
//! handful of suggestion cards. General guidance only; nothing is stored.

use crate::error::ParseError;
use std::str::FromStr;

/// Shown under every set of suggestions
pub const FOOD_DISCLAIMER: &str =
    "This is a general UI suggestion only. Consult a veterinarian for medical or diet advice.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifeStage {
    Puppy,
    #[default]
    Adult,
    Senior,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DogSize {
    Small,
    #[default]
    Medium,
    Large,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HealthNeed {
    #[default]
    Normal,
    Sensitive,
}

impl FromStr for LifeStage {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "puppy" => Ok(LifeStage::Puppy),
            "adult" => Ok(LifeStage::Adult),
            "senior" => Ok(LifeStage::Senior),
            _ => Err(ParseError::UnknownLifeStage(s.to_string())),
        }
    }
}

impl FromStr for DogSize {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "small" => Ok(DogSize::Small),
            "medium" => Ok(DogSize::Medium),
            "large" => Ok(DogSize::Large),
            _ => Err(ParseError::UnknownSize(s.to_string())),
        }
    }
}

impl FromStr for HealthNeed {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" | "none" => Ok(HealthNeed::Normal),
            "sensitive" => Ok(HealthNeed::Sensitive),
            _ => Err(ParseError::UnknownHealth(s.to_string())),
        }
    }
}

/// Inputs to the rule table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FoodQuery {
    pub age: LifeStage,
    pub size: DogSize,
    pub health: HealthNeed,
}

/// One suggestion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoodCard {
    pub title: &'static str,
    pub description: &'static str,
    pub price: &'static str,
    pub ingredients: &'static str,
}

/// Suggestions for a query, in display order
pub fn recommend(query: &FoodQuery) -> Vec<FoodCard> {
    let sensitive = query.health == HealthNeed::Sensitive;
    let mut cards = Vec::with_capacity(4);

    cards.push(FoodCard {
        title: "Home-friendly option",
        description: if query.age == LifeStage::Puppy {
            "High-protein, soft foods: cooked chicken, rice, pumpkin."
        } else {
            "Lean proteins with cooked veggies and rice."
        },
        price: "Cost: Low",
        ingredients: "Protein, boiled rice, pumpkin, carrots",
    });

    cards.push(FoodCard {
        title: "Packaged kibble (brand examples)",
        description: if query.size == DogSize::Small {
            "Small-breed kibble that is easier to chew."
        } else {
            "Balanced adult formula for energy & digestion."
        },
        price: if sensitive {
            "Price: Medium (sensitive formula)"
        } else {
            "Price: Medium"
        },
        ingredients: "Balanced protein, fiber, essential vitamins",
    });

    cards.push(FoodCard {
        title: "Budget-friendly tip",
        description: "Mix premium kibble with home-cooked additions to boost nutrients.",
        price: "Price: Low–Medium",
        ingredients: "Kibble + boiled protein",
    });

    if sensitive {
        cards.push(FoodCard {
            title: "Sensitive stomach options",
            description:
                "Limited-ingredient diets and novel proteins may help. Introduce changes slowly.",
            price: "Price: Medium",
            ingredients: "Single-protein, rice/oat base",
        });
    }

    cards
}
