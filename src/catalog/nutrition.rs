use serde::Serialize;

/// One feeding stage of the nutrition guide.
#[derive(Debug, Clone, Serialize)]
pub struct NutritionStage {
    pub id: &'static str,
    pub age_range: &'static str,
    pub title: &'static str,
    pub icon: &'static str,
    pub overview: &'static str,
    pub key_points: &'static [&'static str],
    pub foods: &'static [StageFood],
    pub schedule: &'static [&'static str],
    pub warnings: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
pub struct StageFood {
    pub name: &'static str,
    pub tip: &'static str,
}

/// The stage a baby is currently in. Stage boundaries are half-open
/// (a 4-month-old has moved on to "4-6").
pub fn current_stage_id(age_months: i64) -> &'static str {
    if age_months < 4 {
        "0-4"
    } else if age_months < 6 {
        "4-6"
    } else if age_months < 8 {
        "6-8"
    } else if age_months < 10 {
        "8-10"
    } else if age_months < 12 {
        "10-12"
    } else {
        "12+"
    }
}

pub static STAGES: &[NutritionStage] = &[
    NutritionStage {
        id: "0-4",
        age_range: "0-4 months",
        title: "Exclusive Milk Feeding",
        icon: "🍼",
        overview: "Breast milk or formula provides all the nutrition your baby needs. No water, juice, or solid foods are needed.",
        key_points: &[
            "Breast milk is the ideal first food",
            "Formula is a safe alternative when breastfeeding isn't possible",
            "Feed on demand - usually 8-12 times per day",
            "Look for hunger cues: rooting, hand-to-mouth, fussiness",
        ],
        foods: &[
            StageFood { name: "Breast Milk", tip: "Contains antibodies and perfect nutrition" },
            StageFood { name: "Formula", tip: "Iron-fortified formula recommended" },
        ],
        schedule: &[
            "Every 2-3 hours, or 8-12 feedings per day",
            "1-3 oz per feeding in first weeks",
            "Gradually increases to 4-5 oz by 4 months",
            "Follow baby's hunger and fullness cues",
        ],
        warnings: &[
            "No water - can cause electrolyte imbalance",
            "No cereal in bottles - doesn't help sleep",
            "No honey - risk of botulism",
            "No cow's milk until 12 months",
        ],
    },
    NutritionStage {
        id: "4-6",
        age_range: "4-6 months",
        title: "Introduction Readiness",
        icon: "👀",
        overview: "Watch for signs of readiness to start solids. Most babies are ready around 6 months, but some show signs earlier.",
        key_points: &[
            "Continue breast milk or formula as primary nutrition",
            "Watch for readiness signs, not just age",
            "Can sit with support and has good head control",
            "Shows interest in food when others are eating",
        ],
        foods: &[
            StageFood { name: "Breast Milk/Formula", tip: "Still the main nutrition source" },
            StageFood { name: "Iron-fortified cereal", tip: "If starting early, single-grain only" },
            StageFood { name: "Pureed vegetables", tip: "Very smooth consistency" },
        ],
        schedule: &[
            "Breast milk/formula: 24-32 oz per day",
            "If starting solids: 1-2 tablespoons once daily",
            "Best time: when baby is alert and happy",
            "Start with single-ingredient foods",
        ],
        warnings: &[
            "Wait 3-5 days between new foods to check for allergies",
            "Texture should be very smooth, no chunks",
            "Don't force feed - baby knows when full",
            "Consult pediatrician before 6 months",
        ],
    },
    NutritionStage {
        id: "6-8",
        age_range: "6-8 months",
        title: "First Foods Adventure",
        icon: "🥣",
        overview: "Time for solid food exploration! Start with single-ingredient purees and gradually introduce variety.",
        key_points: &[
            "Breast milk/formula still provides most nutrition",
            "Introduce iron-rich foods first (key for development)",
            "Offer a variety of flavors and colors",
            "Let baby set the pace - don't rush",
        ],
        foods: &[
            StageFood { name: "Iron-fortified cereal", tip: "Rice, oat, or barley cereal" },
            StageFood { name: "Pureed meats", tip: "Excellent iron source" },
            StageFood { name: "Pureed vegetables", tip: "Sweet potato, peas, carrots, squash" },
            StageFood { name: "Pureed fruits", tip: "Banana, avocado, pear, apple" },
            StageFood { name: "Legumes", tip: "Pureed lentils, beans" },
        ],
        schedule: &[
            "Breast milk/formula: 24-32 oz per day",
            "Solids: 2-3 meals per day",
            "2-4 tablespoons per meal",
            "Offer milk before solids initially",
        ],
        warnings: &[
            "Introduce common allergens early (peanut, egg)",
            "Avoid honey until 12 months",
            "No whole nuts, grapes, or hard foods",
            "Watch for allergic reactions",
        ],
    },
    NutritionStage {
        id: "8-10",
        age_range: "8-10 months",
        title: "Texture Exploration",
        icon: "🥄",
        overview: "Graduate from smooth purees to mashed and soft finger foods. Baby is developing pincer grasp!",
        key_points: &[
            "Move from purees to mashed/lumpy textures",
            "Introduce soft finger foods",
            "Baby may start using pincer grasp",
            "Encourage self-feeding with supervision",
        ],
        foods: &[
            StageFood { name: "Mashed fruits", tip: "Soft banana, ripe pear, mango" },
            StageFood { name: "Soft vegetables", tip: "Well-cooked broccoli, carrots" },
            StageFood { name: "Soft proteins", tip: "Shredded chicken, soft fish, tofu" },
            StageFood { name: "Finger foods", tip: "Puffs, small pasta, soft cheese" },
            StageFood { name: "Whole grains", tip: "Soft bread pieces, oatmeal" },
        ],
        schedule: &[
            "Breast milk/formula: 24-30 oz per day",
            "Solids: 3 meals per day",
            "Plus 1-2 snacks",
            "Sippy cup practice with water at meals",
        ],
        warnings: &[
            "Cut round foods to prevent choking",
            "Always supervise during meals",
            "Avoid hard, sticky, or slippery foods",
            "No cow's milk as main drink yet",
        ],
    },
    NutritionStage {
        id: "10-12",
        age_range: "10-12 months",
        title: "Family Foods Transition",
        icon: "🍽️",
        overview: "Baby can eat most family foods in appropriate sizes. Moving toward toddler eating patterns!",
        key_points: &[
            "Can eat most soft table foods",
            "Three meals plus 2 snacks daily",
            "Self-feeding skills improving",
            "Preparing for transition from bottle/breast",
        ],
        foods: &[
            StageFood { name: "Soft table foods", tip: "Cut into small, safe pieces" },
            StageFood { name: "Eggs", tip: "Scrambled or hard-boiled (cut up)" },
            StageFood { name: "Dairy", tip: "Cheese, yogurt (not milk as drink)" },
            StageFood { name: "Variety of proteins", tip: "Fish, chicken, beans, tofu" },
            StageFood { name: "All vegetables", tip: "Cooked soft, variety of colors" },
        ],
        schedule: &[
            "Breast milk/formula: 16-24 oz per day",
            "3 meals + 2 snacks daily",
            "Offer water in cup at meals",
            "Transitioning milk to be supplement not main",
        ],
        warnings: &[
            "Still avoid honey until 12 months",
            "No whole grapes, nuts, popcorn, hot dogs",
            "Cut foods to fingernail-size pieces",
            "Watch sodium in processed foods",
        ],
    },
    NutritionStage {
        id: "12+",
        age_range: "12+ months",
        title: "Toddler Nutrition",
        icon: "👦",
        overview: "Your toddler can now drink cow's milk and eat almost anything the family eats. Focus on balanced nutrition!",
        key_points: &[
            "Can transition to whole cow's milk",
            "Eating pattern similar to family",
            "Expected pickiness - stay patient",
            "Continue offering variety",
        ],
        foods: &[
            StageFood { name: "Whole milk", tip: "16-24 oz per day, not more" },
            StageFood { name: "Family meals", tip: "Same foods, appropriate sizes" },
            StageFood { name: "Whole grains", tip: "Bread, pasta, cereals, rice" },
            StageFood { name: "Protein variety", tip: "Meat, fish, eggs, beans, dairy" },
            StageFood { name: "Fruits & vegetables", tip: "5+ servings per day goal" },
        ],
        schedule: &[
            "3 meals + 2-3 snacks daily",
            "Whole milk: 16-24 oz per day",
            "Water available throughout day",
            "Family mealtimes together",
        ],
        warnings: &[
            "Avoid low-fat milk until age 2",
            "Still no whole nuts, hard candy, popcorn",
            "Limit juice to 4 oz per day if any",
            "Watch for iron deficiency",
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_boundaries() {
        assert_eq!(current_stage_id(0), "0-4");
        assert_eq!(current_stage_id(3), "0-4");
        assert_eq!(current_stage_id(4), "4-6");
        assert_eq!(current_stage_id(6), "6-8");
        assert_eq!(current_stage_id(9), "8-10");
        assert_eq!(current_stage_id(11), "10-12");
        assert_eq!(current_stage_id(12), "12+");
        assert_eq!(current_stage_id(30), "12+");
    }

    #[test]
    fn test_every_stage_id_is_reachable() {
        for stage in STAGES {
            assert!(
                (0..=14).any(|m| current_stage_id(m) == stage.id),
                "stage {} unreachable",
                stage.id
            );
        }
    }
}
