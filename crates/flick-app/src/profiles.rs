use flick_deck::Card;

/// A candidate shown on the discovery stack.
///
/// Photo entries are asset paths; nothing in this crate loads them. The id
/// is what the session and the chat store key decisions on.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub age: u8,
    pub bio: String,
    pub photos: Vec<String>,
    pub interests: Vec<String>,
    pub distance_km: u32,
    pub verified: bool,
}

impl UserProfile {
    pub fn new(id: impl Into<String>, name: impl Into<String>, age: u8) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            age,
            bio: String::new(),
            photos: Vec::new(),
            interests: Vec::new(),
            distance_km: 0,
            verified: false,
        }
    }

    pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = bio.into();
        self
    }

    pub fn with_photos(mut self, photos: &[&str]) -> Self {
        self.photos = photos.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn with_interests(mut self, interests: &[&str]) -> Self {
        self.interests = interests.iter().map(|i| i.to_string()).collect();
        self
    }

    pub fn with_distance_km(mut self, distance_km: u32) -> Self {
        self.distance_km = distance_km;
        self
    }

    pub fn verified(mut self) -> Self {
        self.verified = true;
        self
    }
}

impl Card for UserProfile {
    fn id(&self) -> &str {
        &self.id
    }
}

/// The signed-in user's own profile, shown on the Profile tab.
#[derive(Debug, Clone, PartialEq)]
pub struct OwnProfile {
    pub name: String,
    pub age: u8,
    pub bio: String,
    pub photos: Vec<String>,
    pub interests: Vec<String>,
    pub job: String,
    pub school: String,
    pub verified: bool,
}

/// The demo account every sign-in lands on.
pub fn own_profile() -> OwnProfile {
    OwnProfile {
        name: "Alex".to_string(),
        age: 25,
        bio: "Always planning the next trip, the next trail, the next coffee stop.".to_string(),
        photos: vec![
            "assets/alex-1.jpg".to_string(),
            "assets/alex-2.jpg".to_string(),
            "assets/alex-3.jpg".to_string(),
        ],
        interests: vec![
            "Travel".to_string(),
            "Photography".to_string(),
            "Hiking".to_string(),
            "Coffee".to_string(),
            "Dogs".to_string(),
            "Music".to_string(),
        ],
        job: "Software developer".to_string(),
        school: "State university".to_string(),
        verified: true,
    }
}

/// The six candidates the discovery feed serves, in feed order.
pub fn mock_profiles() -> Vec<UserProfile> {
    vec![
        UserProfile::new("1", "Emma", 24)
            .with_bio("Weekends are for trailheads and good espresso. Show me a view worth the climb.")
            .with_photos(&["assets/emma-1.jpg", "assets/emma-2.jpg", "assets/emma-3.jpg"])
            .with_interests(&["Travel", "Photography", "Hiking", "Coffee"])
            .with_distance_km(3)
            .verified(),
        UserProfile::new("2", "Sofia", 26)
            .with_bio("Yoga at sunrise, experiments in the kitchen after dark. My sourdough has a fan club.")
            .with_photos(&["assets/sofia-1.jpg", "assets/sofia-2.jpg"])
            .with_interests(&["Yoga", "Cooking", "Wine", "Reading"])
            .with_distance_km(7)
            .verified(),
        UserProfile::new("3", "Maya", 22)
            .with_bio("Art school survivor. I paint, I dance badly, and I will beat you at kart racing.")
            .with_photos(&["assets/maya-1.jpg", "assets/maya-2.jpg"])
            .with_interests(&["Art", "Dancing", "Gaming", "Music"])
            .with_distance_km(12),
        UserProfile::new("4", "Zoe", 28)
            .with_bio("Marathon in training, dog mom in practice. Tell me where the best ramen hides.")
            .with_photos(&["assets/zoe-1.jpg", "assets/zoe-2.jpg", "assets/zoe-3.jpg"])
            .with_interests(&["Fitness", "Dogs", "Movies", "Travel"])
            .with_distance_km(5)
            .verified(),
        UserProfile::new("5", "Luna", 25)
            .with_bio("Record collector with a soft spot for late night screenings and my two cats.")
            .with_photos(&["assets/luna-1.jpg"])
            .with_interests(&["Music", "Movies", "Cats", "Fashion"])
            .with_distance_km(9),
        UserProfile::new("6", "Aria", 23)
            .with_bio("Chasing golden hour with a camera in one hand and a flat white in the other.")
            .with_photos(&["assets/aria-1.jpg", "assets/aria-2.jpg"])
            .with_interests(&["Photography", "Coffee", "Travel", "Sports"])
            .with_distance_km(15)
            .verified(),
    ]
}
