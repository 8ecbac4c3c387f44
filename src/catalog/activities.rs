use rand::seq::SliceRandom;
use serde::Serialize;

use super::in_age_range;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityCategory {
    Sensory,
    Motor,
    Cognitive,
    Social,
    Language,
    Creative,
}

impl ActivityCategory {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "sensory" => Some(Self::Sensory),
            "motor" => Some(Self::Motor),
            "cognitive" => Some(Self::Cognitive),
            "social" => Some(Self::Social),
            "language" => Some(Self::Language),
            "creative" => Some(Self::Creative),
            _ => None,
        }
    }
}

/// One entry of the built-in play-activity library.
#[derive(Debug, Clone, Serialize)]
pub struct Activity {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub age_min: i32,
    pub age_max: i32,
    pub duration_minutes: i32,
    pub category: ActivityCategory,
    pub materials: &'static [&'static str],
    pub steps: &'static [&'static str],
    pub benefits: &'static [&'static str],
    pub milestone: Option<&'static str>,
    pub icon: &'static str,
}

/// Activities matching the baby's age (inclusive range) and, when given,
/// a single category.
pub fn filtered(age_months: i64, category: Option<ActivityCategory>) -> Vec<&'static Activity> {
    CATALOG
        .iter()
        .filter(|a| in_age_range(age_months, a.age_min, a.age_max))
        .filter(|a| category.map_or(true, |c| a.category == c))
        .collect()
}

/// "Surprise me": uniform random pick from the filtered set.
/// Returns None when the filtered set is empty.
pub fn surprise(age_months: i64, category: Option<ActivityCategory>) -> Option<&'static Activity> {
    filtered(age_months, category)
        .choose(&mut rand::thread_rng())
        .copied()
}

pub static CATALOG: &[Activity] = &[
    // 0-3 months
    Activity {
        id: "tummy-time",
        title: "Tummy Time",
        description: "Strengthen neck and shoulder muscles while exploring the world from a new angle.",
        age_min: 0,
        age_max: 6,
        duration_minutes: 5,
        category: ActivityCategory::Motor,
        materials: &["Soft mat or blanket", "Optional: mirror, toys"],
        steps: &[
            "Place baby on their tummy on a firm, flat surface",
            "Get down to baby's eye level and talk/sing to them",
            "Place colorful toys just out of reach to encourage reaching",
            "Start with 1-2 minutes, work up to 5+ minutes",
            "Always supervise - never leave baby unattended",
        ],
        benefits: &["Builds neck strength", "Prevents flat head", "Develops motor skills"],
        milestone: Some("Head control"),
        icon: "🏋️",
    },
    Activity {
        id: "high-contrast",
        title: "High Contrast Cards",
        description: "Stimulate visual development with bold black and white patterns.",
        age_min: 0,
        age_max: 3,
        duration_minutes: 5,
        category: ActivityCategory::Sensory,
        materials: &["Black and white cards or printed patterns", "Optional: card holder"],
        steps: &[
            "Hold card 8-12 inches from baby's face",
            "Move the card slowly from side to side",
            "Watch baby's eyes track the pattern",
            "Try different patterns to see which baby prefers",
            "Talk about what you see",
        ],
        benefits: &["Visual tracking", "Focus development", "Brain stimulation"],
        milestone: Some("Visual tracking"),
        icon: "👁️",
    },
    Activity {
        id: "gentle-massage",
        title: "Baby Massage",
        description: "Bond with gentle touch while promoting relaxation and body awareness.",
        age_min: 0,
        age_max: 12,
        duration_minutes: 10,
        category: ActivityCategory::Sensory,
        materials: &["Baby-safe oil (optional)", "Warm room", "Soft towel"],
        steps: &[
            "Ensure the room is warm and baby is calm",
            "Remove baby's clothes, keep diaper on if preferred",
            "Use gentle strokes on legs, then arms, then tummy",
            "Sing or talk softly while massaging",
            "Follow baby's cues - stop if they seem uncomfortable",
        ],
        benefits: &["Bonding", "Relaxation", "Body awareness", "Better sleep"],
        milestone: None,
        icon: "💆",
    },
    // 3-6 months
    Activity {
        id: "reach-grab",
        title: "Reach and Grab",
        description: "Encourage reaching and grasping skills with enticing toys.",
        age_min: 3,
        age_max: 6,
        duration_minutes: 10,
        category: ActivityCategory::Motor,
        materials: &["Soft toys", "Rattles", "Textured objects"],
        steps: &[
            "Lay baby on their back on a play mat",
            "Hold a toy just within reach",
            "Encourage baby to reach for it",
            "Let them explore the texture and sound",
            "Celebrate their efforts with enthusiasm!",
        ],
        benefits: &["Hand-eye coordination", "Grasping skills", "Cause and effect"],
        milestone: Some("Grasping objects"),
        icon: "🤲",
    },
    Activity {
        id: "mirror-play",
        title: "Mirror Play",
        description: "Introduce baby to their reflection and encourage social development.",
        age_min: 2,
        age_max: 12,
        duration_minutes: 5,
        category: ActivityCategory::Social,
        materials: &["Baby-safe mirror"],
        steps: &[
            "Hold baby securely in front of mirror",
            "Point to baby's reflection: 'Who's that?'",
            "Make facial expressions and watch them react",
            "Touch different body parts and name them",
            "Let baby touch the mirror safely",
        ],
        benefits: &["Self-awareness", "Social smiling", "Facial recognition"],
        milestone: Some("Social smiling"),
        icon: "🪞",
    },
    Activity {
        id: "bubble-fun",
        title: "Bubble Watching",
        description: "Captivate baby with floating bubbles to encourage tracking and reaching.",
        age_min: 3,
        age_max: 18,
        duration_minutes: 10,
        category: ActivityCategory::Sensory,
        materials: &["Bubble solution", "Bubble wand"],
        steps: &[
            "Blow bubbles where baby can see them",
            "Point to bubbles and describe them",
            "Let baby try to reach for/touch bubbles",
            "Talk about colors and movement",
            "Pop bubbles together for fun!",
        ],
        benefits: &["Visual tracking", "Reaching", "Cause and effect", "Sensory experience"],
        milestone: None,
        icon: "🫧",
    },
    // 6-9 months
    Activity {
        id: "peek-a-boo",
        title: "Peek-a-Boo",
        description: "Classic game that teaches object permanence and brings endless giggles!",
        age_min: 4,
        age_max: 18,
        duration_minutes: 5,
        category: ActivityCategory::Cognitive,
        materials: &["Blanket or cloth", "Your hands"],
        steps: &[
            "Cover your face with hands or cloth",
            "Say 'Where's Mommy/Daddy?'",
            "Remove cover and say 'Peek-a-boo!'",
            "Watch for baby's delighted reaction",
            "Let baby try covering their face too",
        ],
        benefits: &["Object permanence", "Anticipation", "Social interaction", "Joy!"],
        milestone: Some("Object permanence"),
        icon: "🙈",
    },
    Activity {
        id: "texture-exploration",
        title: "Texture Discovery Box",
        description: "Explore different textures to stimulate tactile senses.",
        age_min: 5,
        age_max: 12,
        duration_minutes: 10,
        category: ActivityCategory::Sensory,
        materials: &["Box/basket", "Various textured items: soft, rough, smooth, bumpy"],
        steps: &[
            "Gather safe items with different textures",
            "Let baby touch each item one at a time",
            "Describe what they're feeling: 'soft,' 'bumpy'",
            "Guide their hands if needed",
            "Watch for their preferences",
        ],
        benefits: &["Tactile development", "Vocabulary building", "Sensory processing"],
        milestone: None,
        icon: "🧸",
    },
    Activity {
        id: "stacking-cups",
        title: "Stacking Cups",
        description: "Build and knock down towers for endless fun and learning!",
        age_min: 6,
        age_max: 24,
        duration_minutes: 15,
        category: ActivityCategory::Cognitive,
        materials: &["Stacking cups or blocks"],
        steps: &[
            "Stack cups into a tower",
            "Encourage baby to knock it down",
            "Celebrate the crash together!",
            "Help baby try stacking one on top",
            "Progress to more cups as skills develop",
        ],
        benefits: &["Cause and effect", "Fine motor skills", "Size concepts", "Problem solving"],
        milestone: Some("Stacking objects"),
        icon: "🏗️",
    },
    // 9-12 months
    Activity {
        id: "container-play",
        title: "In and Out Game",
        description: "Fill containers and dump them out - simple but endlessly entertaining!",
        age_min: 8,
        age_max: 18,
        duration_minutes: 15,
        category: ActivityCategory::Cognitive,
        materials: &["Container", "Small toys or balls"],
        steps: &[
            "Show baby how to put toys IN the container",
            "Dump them OUT with exaggerated 'Uh oh!'",
            "Hand baby a toy to put in",
            "Let them dump and repeat",
            "Count objects as you go",
        ],
        benefits: &["Object permanence", "Fine motor", "Spatial awareness", "Early math"],
        milestone: None,
        icon: "📦",
    },
    Activity {
        id: "music-dance",
        title: "Dance Party",
        description: "Move to music together for rhythm, coordination, and joy!",
        age_min: 6,
        age_max: 36,
        duration_minutes: 10,
        category: ActivityCategory::Motor,
        materials: &["Music player", "Optional: scarves, instruments"],
        steps: &[
            "Put on upbeat, baby-friendly music",
            "Hold baby and sway/bounce to the beat",
            "Move their arms and legs rhythmically",
            "Let them feel the music vibrations",
            "Add instruments like shakers as they grow",
        ],
        benefits: &["Rhythm awareness", "Balance", "Bonding", "Gross motor skills"],
        milestone: None,
        icon: "💃",
    },
    Activity {
        id: "book-reading",
        title: "Story Time",
        description: "Read together to build language, bonding, and love of books.",
        age_min: 0,
        age_max: 36,
        duration_minutes: 10,
        category: ActivityCategory::Language,
        materials: &["Board books with bright pictures"],
        steps: &[
            "Cuddle baby in your lap with book in view",
            "Point to pictures and name them",
            "Let baby touch and explore pages",
            "Use animated voices for characters",
            "Follow baby's attention - it's okay to skip pages!",
        ],
        benefits: &["Language development", "Bonding", "Attention span", "Pre-literacy"],
        milestone: Some("Babbling"),
        icon: "📚",
    },
    Activity {
        id: "finger-foods",
        title: "Finger Food Fun",
        description: "Practice pincer grasp while exploring new textures and tastes.",
        age_min: 8,
        age_max: 18,
        duration_minutes: 15,
        category: ActivityCategory::Motor,
        materials: &["Baby-safe finger foods", "High chair", "Bib"],
        steps: &[
            "Place a few small pieces on high chair tray",
            "Let baby explore texture with hands first",
            "Demonstrate picking up with thumb and finger",
            "Celebrate successful grabs and bites",
            "Supervise closely for safety",
        ],
        benefits: &["Pincer grasp", "Self-feeding", "Independence", "Texture exposure"],
        milestone: Some("Pincer grasp"),
        icon: "🥕",
    },
    // 12+ months
    Activity {
        id: "scribble-art",
        title: "First Scribbles",
        description: "Introduce crayons for early mark-making and creativity.",
        age_min: 12,
        age_max: 36,
        duration_minutes: 15,
        category: ActivityCategory::Creative,
        materials: &["Large paper", "Chunky crayons", "Tape"],
        steps: &[
            "Tape paper to table so it doesn't move",
            "Show baby how to hold crayon",
            "Make marks together - any scribble counts!",
            "Name the colors you're using",
            "Celebrate their 'masterpiece'",
        ],
        benefits: &["Fine motor", "Creativity", "Color recognition", "Pre-writing"],
        milestone: None,
        icon: "🖍️",
    },
    Activity {
        id: "ball-play",
        title: "Ball Rolling",
        description: "Roll a ball back and forth to teach turn-taking and tracking.",
        age_min: 6,
        age_max: 24,
        duration_minutes: 10,
        category: ActivityCategory::Social,
        materials: &["Soft ball"],
        steps: &[
            "Sit facing baby with legs spread",
            "Roll ball gently toward them",
            "Encourage them to push it back",
            "Cheer: 'You rolled it back!'",
            "Take turns and keep it going",
        ],
        benefits: &["Turn-taking", "Gross motor", "Social interaction", "Tracking"],
        milestone: None,
        icon: "⚽",
    },
    Activity {
        id: "water-play",
        title: "Splash Time",
        description: "Safe water play for sensory exploration and fun.",
        age_min: 6,
        age_max: 36,
        duration_minutes: 15,
        category: ActivityCategory::Sensory,
        materials: &["Shallow basin", "Warm water", "Cups, spoons", "Towel"],
        steps: &[
            "Fill basin with a few inches of warm water",
            "Let baby splash with hands",
            "Add cups for pouring",
            "Describe: 'wet,' 'splash,' 'pour'",
            "ALWAYS supervise - never leave unattended",
        ],
        benefits: &["Sensory exploration", "Cause and effect", "Fine motor", "Vocabulary"],
        milestone: None,
        icon: "💦",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_integrity() {
        for a in CATALOG {
            assert!(a.age_min <= a.age_max, "bad range on {}", a.id);
            assert!(a.duration_minutes > 0, "no duration on {}", a.id);
            assert!(!a.steps.is_empty(), "no steps on {}", a.id);
            assert!(!a.benefits.is_empty(), "no benefits on {}", a.id);
        }
    }

    #[test]
    fn test_filter_by_age_inclusive() {
        // At 6 months, tummy-time [0,6] is still included; high-contrast [0,3] is not.
        let ids: Vec<&str> = filtered(6, None).iter().map(|a| a.id).collect();
        assert!(ids.contains(&"tummy-time"));
        assert!(ids.contains(&"stacking-cups"));
        assert!(!ids.contains(&"high-contrast"));
        assert!(!ids.contains(&"scribble-art"));
    }

    #[test]
    fn test_filter_by_category() {
        let motor = filtered(6, Some(ActivityCategory::Motor));
        assert!(!motor.is_empty());
        assert!(motor.iter().all(|a| a.category == ActivityCategory::Motor));
    }

    #[test]
    fn test_surprise_returns_member_of_filtered_set() {
        let ids: Vec<&str> = filtered(6, None).iter().map(|a| a.id).collect();
        for _ in 0..20 {
            let picked = surprise(6, None).expect("set is non-empty at 6 months");
            assert!(ids.contains(&picked.id));
        }
    }

    #[test]
    fn test_surprise_empty_set_is_none() {
        // The library tops out at 36 months.
        assert!(surprise(40, Some(ActivityCategory::Motor)).is_none());
        assert!(surprise(200, None).is_none());
    }
}
