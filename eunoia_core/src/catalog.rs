//! Built-in content catalog.
//!
//! This module provides the labels, quick-mood messages, avatar options and
//! education library that ship with the application.

use crate::types::*;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Cached catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<Catalog> = Lazy::new(build_default_catalog_internal);

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static Catalog {
    &DEFAULT_CATALOG
}

/// Builds the default catalog with built-in labels and topics
///
/// **Note**: For production use, prefer `get_default_catalog()` which returns
/// a cached reference. This function is retained for testing.
pub fn build_default_catalog() -> Catalog {
    build_default_catalog_internal()
}

/// Internal function that actually builds the catalog
fn build_default_catalog_internal() -> Catalog {
    // ========================================================================
    // Tracker labels
    // ========================================================================

    let symptoms = vec![
        "Cramps".to_string(),
        "Bloating".to_string(),
        "Headache".to_string(),
        "Fatigue".to_string(),
        "Mood swings".to_string(),
        "Acne".to_string(),
    ];

    let tracker_moods = vec![
        "😊 Happy".to_string(),
        "😌 Calm".to_string(),
        "😢 Sad".to_string(),
        "😤 Irritated".to_string(),
        "💪 Energetic".to_string(),
        "😴 Tired".to_string(),
    ];

    let flow_levels = vec![
        FlowIntensity::Light,
        FlowIntensity::Medium,
        FlowIntensity::Heavy,
    ];

    // ========================================================================
    // Quick check-in moods
    // ========================================================================

    let quick_moods = vec![
        QuickMood {
            emoji: "😊".into(),
            message: "I'm so glad you're feeling happy! Remember to take care of yourself \
                      and stay hydrated. If you need anything, I'm here for you! 💕"
                .into(),
        },
        QuickMood {
            emoji: "😌".into(),
            message: "Feeling calm and peaceful is wonderful! Take this moment to appreciate \
                      your body and all it does for you. You're doing great! 🌸"
                .into(),
        },
        QuickMood {
            emoji: "😢".into(),
            message: "I'm sorry you're feeling down. Remember that your feelings are valid, \
                      and it's okay to not be okay. Would you like to chat about what's on \
                      your mind? I'm here to listen. 💗"
                .into(),
        },
        QuickMood {
            emoji: "😴".into(),
            message: "Feeling tired? Make sure you're getting enough rest and taking care of \
                      yourself. Your body needs rest, especially during your cycle. Take it \
                      easy! 😴"
                .into(),
        },
        QuickMood {
            emoji: "😤".into(),
            message: "I understand you might be feeling frustrated or irritated. This is \
                      completely normal, especially with hormonal changes. Take deep breaths, \
                      and remember I'm here if you need to talk. 💪"
                .into(),
        },
        QuickMood {
            emoji: "💪".into(),
            message: "You're feeling strong and energetic! That's amazing! Use this energy to \
                      take care of yourself and do things that make you happy. You've got \
                      this! 🌟"
                .into(),
        },
        QuickMood {
            emoji: "🤗".into(),
            message: "Feeling warm and caring? That's beautiful! Remember to extend that same \
                      care to yourself. You deserve all the love and kindness. 💕"
                .into(),
        },
        QuickMood {
            emoji: "😍".into(),
            message: "You're feeling amazing! I love to see you happy and confident. Keep \
                      that positive energy flowing! You're wonderful just as you are! ✨"
                .into(),
        },
    ];

    let avatars = vec![
        "🌸".to_string(),
        "💗".to_string(),
        "🌺".to_string(),
        "🌷".to_string(),
        "🌻".to_string(),
    ];

    // ========================================================================
    // Education topics
    // ========================================================================

    let topics = vec![
        EducationTopic {
            id: 1,
            title: "Menstrual Cycle Basics".into(),
            description: "Learn about the phases of your menstrual cycle, what's normal, and \
                          how to track it effectively."
                .into(),
            icon: "📅".into(),
            category: "Basics".into(),
        },
        EducationTopic {
            id: 2,
            title: "Period Pain Relief".into(),
            description: "Natural and medical remedies to manage cramps, bloating, and \
                          discomfort during your period."
                .into(),
            icon: "💊".into(),
            category: "Health".into(),
        },
        EducationTopic {
            id: 3,
            title: "Nutrition & Hormones".into(),
            description: "Discover how food affects your hormones and cycle, and what to eat \
                          for better menstrual health."
                .into(),
            icon: "🥗".into(),
            category: "Nutrition".into(),
        },
        EducationTopic {
            id: 4,
            title: "Mental Health & Periods".into(),
            description: "Understanding the connection between your cycle and mental \
                          wellbeing, including PMS and PMDD."
                .into(),
            icon: "🧘".into(),
            category: "Mental Health".into(),
        },
        EducationTopic {
            id: 5,
            title: "Hygiene & Self-Care".into(),
            description: "Best practices for menstrual hygiene, product options, and \
                          self-care during your period."
                .into(),
            icon: "🌸".into(),
            category: "Self-Care".into(),
        },
        EducationTopic {
            id: 6,
            title: "Irregular Periods".into(),
            description: "Understanding what causes irregular cycles, when to seek help, and \
                          how to manage them."
                .into(),
            icon: "📊".into(),
            category: "Health".into(),
        },
        EducationTopic {
            id: 7,
            title: "Fertility Awareness".into(),
            description: "Learn about your fertile window, ovulation signs, and natural \
                          family planning methods."
                .into(),
            icon: "🌺".into(),
            category: "Fertility".into(),
        },
        EducationTopic {
            id: 8,
            title: "Teen Menstrual Health".into(),
            description: "A guide for young people starting their period journey, with \
                          age-appropriate information."
                .into(),
            icon: "👧".into(),
            category: "Basics".into(),
        },
        EducationTopic {
            id: 9,
            title: "Menopause & Perimenopause".into(),
            description: "Understanding the transition, symptoms, and how to manage this \
                          natural life stage."
                .into(),
            icon: "🌙".into(),
            category: "Health".into(),
        },
        EducationTopic {
            id: 10,
            title: "Exercise & Your Cycle".into(),
            description: "How to adapt your workout routine to your cycle phases for optimal \
                          health and performance."
                .into(),
            icon: "🏃".into(),
            category: "Fitness".into(),
        },
        EducationTopic {
            id: 11,
            title: "Sleep & Menstrual Health".into(),
            description: "How your cycle affects sleep and strategies for better rest during \
                          different phases."
                .into(),
            icon: "😴".into(),
            category: "Wellness".into(),
        },
        EducationTopic {
            id: 12,
            title: "Cultural Perspectives".into(),
            description: "Exploring menstrual health across different cultures and breaking \
                          taboos together."
                .into(),
            icon: "🌍".into(),
            category: "Culture".into(),
        },
    ];

    // ========================================================================
    // Articles (topics with full content so far)
    // ========================================================================

    let mut articles = HashMap::new();
    articles.insert(1, cycle_basics_article());
    articles.insert(2, pain_relief_article());

    Catalog {
        symptoms,
        tracker_moods,
        quick_moods,
        flow_levels,
        avatars,
        topics,
        articles,
    }
}

fn cycle_basics_article() -> Article {
    Article {
        title: "Menstrual Cycle Basics".into(),
        sections: vec![
            ArticleSection {
                heading: "Understanding Your Menstrual Cycle".into(),
                body: "Your menstrual cycle is a natural process that prepares your body for \
                       potential pregnancy each month. The cycle is controlled by hormones \
                       and typically lasts between 21 to 35 days, with the average being 28 \
                       days. Understanding your cycle helps you track your health and \
                       recognize when something might be off."
                    .into(),
            },
            ArticleSection {
                heading: "The Four Phases of Your Cycle".into(),
                body: "Your menstrual cycle consists of four distinct phases:\n\n\
                       1. **Menstrual Phase (Days 1-5)**: This is when you have your period. \
                       The lining of your uterus (endometrium) is shed, resulting in \
                       menstrual bleeding. This phase typically lasts 3-7 days.\n\n\
                       2. **Follicular Phase (Days 1-13)**: This phase overlaps with \
                       menstruation and continues until ovulation. Your pituitary gland \
                       releases follicle-stimulating hormone (FSH), which stimulates your \
                       ovaries to produce follicles. One follicle will mature into an egg.\n\n\
                       3. **Ovulation (Day 14)**: Around the middle of your cycle, a surge in \
                       luteinizing hormone (LH) triggers the release of a mature egg from \
                       your ovary. This is your most fertile time, and the egg can survive \
                       for 12-24 hours.\n\n\
                       4. **Luteal Phase (Days 15-28)**: After ovulation, the empty follicle \
                       becomes the corpus luteum, which produces progesterone. This hormone \
                       prepares your uterus for a potential pregnancy. If pregnancy doesn't \
                       occur, hormone levels drop, and your next period begins."
                    .into(),
            },
            ArticleSection {
                heading: "What's Normal?".into(),
                body: "Every person's cycle is unique, but here are some general guidelines \
                       for what's considered normal:\n\n\
                       - **Cycle Length**: 21-35 days (variations of a few days are normal)\n\
                       - **Period Duration**: 3-7 days\n\
                       - **Bleeding Amount**: Typically 30-80ml (about 2-6 tablespoons) over \
                       the entire period\n\
                       - **Color Variations**: Blood can range from bright red to dark brown, \
                       and this is normal\n\
                       - **Clots**: Small clots (smaller than a quarter) are usually normal\n\n\
                       Remember: What's normal for you might be different from someone else. \
                       The key is understanding your own pattern."
                    .into(),
            },
            ArticleSection {
                heading: "Tracking Your Cycle".into(),
                body: "Tracking your cycle has many benefits:\n\n\
                       - **Predict Your Period**: Know when to expect your next period\n\
                       - **Identify Patterns**: Notice symptoms, mood changes, or \
                       irregularities\n\
                       - **Fertility Awareness**: Understand your fertile window if you're \
                       trying to conceive or avoid pregnancy\n\
                       - **Health Monitoring**: Detect changes that might indicate health \
                       issues\n\n\
                       You can track your cycle by:\n\
                       - Marking the first day of your period on a calendar\n\
                       - Using period tracking apps\n\
                       - Noting symptoms, mood, and flow intensity\n\
                       - Tracking basal body temperature and cervical mucus (for fertility \
                       awareness)"
                    .into(),
            },
            ArticleSection {
                heading: "When to See a Healthcare Provider".into(),
                body: "While variations are normal, you should consult a healthcare provider \
                       if you experience:\n\n\
                       - Periods that are consistently less than 21 days or more than 35 \
                       days apart\n\
                       - Bleeding that lasts longer than 7 days\n\
                       - Very heavy bleeding (soaking through a pad or tampon every 1-2 \
                       hours)\n\
                       - Severe pain that interferes with daily activities\n\
                       - Missing periods for 3+ months (if not pregnant, menopausal, or on \
                       birth control)\n\
                       - Bleeding between periods\n\
                       - Sudden changes in your cycle pattern\n\n\
                       Remember: Your menstrual health is an important part of your overall \
                       wellbeing. Don't hesitate to seek professional advice if something \
                       doesn't feel right."
                    .into(),
            },
        ],
    }
}

fn pain_relief_article() -> Article {
    Article {
        title: "Period Pain Relief".into(),
        sections: vec![
            ArticleSection {
                heading: "Understanding Period Pain".into(),
                body: "Period pain, also known as dysmenorrhea, is very common. About 80% of \
                       people who menstruate experience some level of discomfort during \
                       their periods. The pain is caused by prostaglandins, hormone-like \
                       substances that make your uterus contract to shed its lining. These \
                       contractions can cause cramping, and in some cases, the pain can be \
                       quite severe."
                    .into(),
            },
            ArticleSection {
                heading: "Natural Remedies".into(),
                body: "Many people find relief through natural methods:\n\n\
                       **Heat Therapy**\n\
                       - Apply a heating pad or hot water bottle to your lower abdomen\n\
                       - Take a warm bath or shower\n\
                       - Use heat patches that stick to your clothing\n\n\
                       **Exercise & Movement**\n\
                       - Light exercise like walking, yoga, or stretching can help\n\
                       - Gentle yoga poses like child's pose or cat-cow can relieve tension\n\
                       - Regular exercise throughout the month may reduce period pain over \
                       time\n\n\
                       **Dietary Changes**\n\
                       - Stay hydrated with plenty of water\n\
                       - Reduce salt intake to minimize bloating\n\
                       - Eat anti-inflammatory foods like ginger, turmeric, and leafy greens\n\
                       - Some people find relief by reducing caffeine and alcohol\n\
                       - Consider foods rich in magnesium (nuts, seeds, dark chocolate)\n\n\
                       **Herbal Remedies**\n\
                       - Ginger tea may help reduce inflammation and pain\n\
                       - Chamomile tea can have calming and anti-inflammatory effects\n\
                       - Cinnamon has been shown to help with menstrual cramps\n\
                       - Always consult with a healthcare provider before trying herbal \
                       supplements"
                    .into(),
            },
            ArticleSection {
                heading: "Medical Treatments".into(),
                body: "If natural remedies aren't enough, medical options are available:\n\n\
                       **Over-the-Counter Medications**\n\
                       - **NSAIDs** (Non-Steroidal Anti-Inflammatory Drugs) like ibuprofen \
                       or naproxen are often the first line of defense\n\
                       - These work by reducing prostaglandin production\n\
                       - Take them at the first sign of cramps for best results\n\
                       - Always follow the recommended dosage on the package\n\n\
                       **Prescription Options**\n\
                       - If OTC medications don't help, your healthcare provider may \
                       prescribe stronger pain relievers\n\
                       - Hormonal birth control (pills, patches, IUDs) can reduce or \
                       eliminate period pain for many people\n\
                       - These work by thinning the uterine lining, which means less \
                       prostaglandin production\n\n\
                       **When to Seek Medical Help**\n\
                       - Pain that's severe and doesn't respond to OTC medications\n\
                       - Pain that interferes with daily activities or sleep\n\
                       - Pain that's getting worse over time\n\
                       - Pain accompanied by heavy bleeding, fever, or other concerning \
                       symptoms"
                    .into(),
            },
            ArticleSection {
                heading: "Additional Comfort Measures".into(),
                body: "Beyond medications, these strategies can help you feel more \
                       comfortable:\n\n\
                       **Rest & Relaxation**\n\
                       - Get plenty of sleep\n\
                       - Practice relaxation techniques like deep breathing or meditation\n\
                       - Take time to rest when you need it\n\n\
                       **Massage & Acupressure**\n\
                       - Gentle abdominal massage can help relieve tension\n\
                       - Acupressure points on the lower back and abdomen may provide relief\n\
                       - Consider professional massage therapy\n\n\
                       **Comfortable Clothing**\n\
                       - Wear loose, comfortable clothing\n\
                       - Avoid tight waistbands that can put pressure on your abdomen\n\n\
                       **Mental Health Support**\n\
                       - Period pain can be emotionally draining\n\
                       - Talk to friends, family, or a counselor if you're struggling\n\
                       - Remember that your pain is valid and seeking help is important"
                    .into(),
            },
            ArticleSection {
                heading: "Prevention Strategies".into(),
                body: "While you can't always prevent period pain, these strategies may help \
                       reduce its severity:\n\n\
                       - **Regular Exercise**: Maintaining an active lifestyle throughout the \
                       month can reduce period pain\n\
                       - **Healthy Diet**: A balanced diet with plenty of fruits, vegetables, \
                       and whole grains supports overall health\n\
                       - **Stress Management**: High stress levels can worsen period \
                       symptoms, so finding healthy ways to manage stress is important\n\
                       - **Adequate Sleep**: Getting 7-9 hours of sleep regularly helps your \
                       body function optimally\n\
                       - **Stay Hydrated**: Drinking enough water throughout the month can \
                       help reduce bloating and discomfort\n\n\
                       Remember: Severe period pain is not something you have to \"just deal \
                       with.\" If your pain is significantly impacting your life, talk to a \
                       healthcare provider. There are many effective treatment options \
                       available."
                    .into(),
            },
        ],
    }
}

impl Catalog {
    /// Validate the catalog for consistency and completeness
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for label in self.symptoms.iter().chain(&self.tracker_moods).chain(&self.avatars) {
            if label.is_empty() {
                errors.push("Catalog has an empty label".to_string());
            }
        }

        for mood in &self.quick_moods {
            if mood.emoji.is_empty() {
                errors.push("Quick mood has empty emoji".to_string());
            }
            if mood.message.is_empty() {
                errors.push(format!("Quick mood '{}' has no message", mood.emoji));
            }
        }

        let mut seen_ids = std::collections::HashSet::new();
        for topic in &self.topics {
            if topic.id == 0 {
                errors.push(format!("Topic '{}' has id 0", topic.title));
            }
            if !seen_ids.insert(topic.id) {
                errors.push(format!("Duplicate topic id {}", topic.id));
            }
            if topic.title.is_empty() {
                errors.push(format!("Topic {} has empty title", topic.id));
            }
            if topic.description.is_empty() {
                errors.push(format!("Topic {} has empty description", topic.id));
            }
            if topic.category.is_empty() {
                errors.push(format!("Topic {} has empty category", topic.id));
            }
        }

        for (id, article) in &self.articles {
            if !seen_ids.contains(id) {
                errors.push(format!("Article {} has no matching topic", id));
            }
            if article.sections.is_empty() {
                errors.push(format!("Article {} has no sections", id));
            }
            for section in &article.sections {
                if section.heading.is_empty() || section.body.is_empty() {
                    errors.push(format!("Article {} has an empty section", id));
                }
            }
        }

        if self.flow_levels.len() != 3 {
            errors.push("Catalog must carry exactly the three flow levels".to_string());
        }

        errors
    }

    /// Topics matching a search query
    ///
    /// Case-insensitive substring match over title, description and
    /// category. An empty query matches everything.
    pub fn search_topics(&self, query: &str) -> Vec<&EducationTopic> {
        let needle = query.to_lowercase();
        self.topics
            .iter()
            .filter(|t| {
                t.title.to_lowercase().contains(&needle)
                    || t.description.to_lowercase().contains(&needle)
                    || t.category.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Topic by id, if it exists
    pub fn topic(&self, id: u32) -> Option<&EducationTopic> {
        self.topics.iter().find(|t| t.id == id)
    }

    /// Article content for a topic, if written yet
    pub fn article(&self, topic_id: u32) -> Option<&Article> {
        self.articles.get(&topic_id)
    }

    /// Supportive message for a quick check-in mood
    pub fn supportive_message(&self, emoji: &str) -> Option<&str> {
        self.quick_moods
            .iter()
            .find(|m| m.emoji == emoji)
            .map(|m| m.message.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_loads() {
        let catalog = build_default_catalog();
        assert_eq!(catalog.symptoms.len(), 6);
        assert_eq!(catalog.tracker_moods.len(), 6);
        assert_eq!(catalog.quick_moods.len(), 8);
        assert_eq!(catalog.flow_levels.len(), 3);
        assert_eq!(catalog.avatars.len(), 5);
        assert_eq!(catalog.topics.len(), 12);
        assert_eq!(catalog.articles.len(), 2);
    }

    #[test]
    fn test_default_catalog_validates() {
        let catalog = build_default_catalog();
        let errors = catalog.validate();
        assert!(
            errors.is_empty(),
            "Default catalog has validation errors: {:?}",
            errors
        );
    }

    #[test]
    fn test_articles_cover_first_two_topics() {
        let catalog = build_default_catalog();
        assert!(catalog.article(1).is_some());
        assert!(catalog.article(2).is_some());
        assert!(catalog.article(3).is_none());
    }

    #[test]
    fn test_search_by_category_is_case_insensitive() {
        let catalog = build_default_catalog();
        let hits = catalog.search_topics("HEALTH");

        assert!(!hits.is_empty());
        // "Health" category plus titles/descriptions mentioning health
        assert!(hits.iter().any(|t| t.title == "Period Pain Relief"));
        assert!(hits.iter().any(|t| t.title == "Irregular Periods"));
    }

    #[test]
    fn test_search_by_title_fragment() {
        let catalog = build_default_catalog();
        let hits = catalog.search_topics("sleep");

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 11);
    }

    #[test]
    fn test_empty_search_returns_everything() {
        let catalog = build_default_catalog();
        assert_eq!(catalog.search_topics("").len(), 12);
    }

    #[test]
    fn test_search_with_no_hits() {
        let catalog = build_default_catalog();
        assert!(catalog.search_topics("astronomy").is_empty());
    }

    #[test]
    fn test_supportive_message_for_known_mood() {
        let catalog = build_default_catalog();
        let message = catalog.supportive_message("😢").unwrap();
        assert!(message.contains("your feelings are valid"));
    }

    #[test]
    fn test_supportive_message_for_unknown_mood() {
        let catalog = build_default_catalog();
        assert!(catalog.supportive_message("🦀").is_none());
    }

    #[test]
    fn test_default_avatar_is_an_option() {
        let catalog = build_default_catalog();
        assert!(catalog.avatars.contains(&"🌸".to_string()));
    }

    #[test]
    fn test_cached_catalog_matches_built_catalog() {
        let cached = get_default_catalog();
        let built = build_default_catalog();
        assert_eq!(cached.topics.len(), built.topics.len());
        assert_eq!(cached.symptoms, built.symptoms);
    }
}
