use crate::narration::Narrator;

pub const MILESTONES: [Milestone; 6] = [
    Milestone {
        year: 2009,
        title: "The Vision Begins",
        hindi: "दृष्टि की शुरुआत",
        description: "Planning Committee on Aadhaar established under the leadership of Nandan Nilekani",
        stat: "Foundation Year",
        details: "The Unique Identification Authority of India (UIDAI) was established to provide every resident a unique identity.",
    },
    Milestone {
        year: 2010,
        title: "First Enrollment",
        hindi: "पहला नामांकन",
        description: "Ranjana Sonawane from Maharashtra becomes the first person to enroll for Aadhaar",
        stat: "1st Enrollment",
        details: "The historic moment when India began its journey towards digital identity for all.",
    },
    Milestone {
        year: 2012,
        title: "Rapid Expansion",
        hindi: "तेज़ विस्तार",
        description: "Aadhaar enrollment crosses 200 million, proving the scalability of the system",
        stat: "200M+ Enrollments",
        details: "Massive infrastructure deployment across India to reach every corner of the nation.",
    },
    Milestone {
        year: 2016,
        title: "Legal Foundation",
        hindi: "कानूनी आधार",
        description: "Aadhaar Act passed by Parliament, providing legal framework for the program",
        stat: "Legal Framework",
        details: "The Aadhaar Act 2016 established the legal foundation for Aadhaar as a tool for service delivery.",
    },
    Milestone {
        year: 2018,
        title: "Supreme Court Validation",
        hindi: "सुप्रीम कोर्ट की मान्यता",
        description: "Supreme Court upholds Aadhaar as constitutionally valid with certain safeguards",
        stat: "Constitutional Validity",
        details: "The highest court of India validated Aadhaar while ensuring privacy protections.",
    },
    Milestone {
        year: 2025,
        title: "Digital India Realized",
        hindi: "डिजिटल इंडिया साकार",
        description: "Over 1.3 billion Aadhaar numbers issued, transforming India into a digitally empowered society",
        stat: "1.3B+ Enrollments",
        details: "Aadhaar has become the backbone of Digital India, enabling seamless service delivery.",
    },
];

/// Headline figures shown under the timeline
pub const IMPACT: [(&str, &str); 4] = [
    ("1.3B+", "Enrollments"),
    ("2.5B+", "Monthly Authentications"),
    ("₹2.2L Cr", "Savings from Duplicates"),
    ("99.9%", "Uptime Reliability"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Milestone {
    pub year: u16,
    pub title: &'static str,
    pub hindi: &'static str,
    pub description: &'static str,
    pub stat: &'static str,
    pub details: &'static str,
}

impl Milestone {
    pub fn narration(&self) -> String {
        format!(
            "In {}, {}. {}. {}",
            self.year, self.title, self.description, self.details
        )
    }
}

#[derive(Debug, Default)]
pub struct StoryView {
    selected: usize,
    playing: bool,
}

impl StoryView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn milestone(&self) -> &Milestone {
        &MILESTONES[self.selected]
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn select(&mut self, idx: usize) {
        if idx < MILESTONES.len() {
            self.selected = idx;
        }
    }

    pub fn select_next(&mut self) {
        self.select((self.selected + 1).min(MILESTONES.len() - 1));
    }

    pub fn select_prev(&mut self) {
        self.select(self.selected.saturating_sub(1));
    }

    /// Read the selected milestone aloud, interrupting anything already playing
    pub fn listen(&mut self, narrator: &dyn Narrator) {
        narrator.cancel();
        narrator.speak(&self.milestone().narration());
        // Muted or missing TTS never starts playing
        self.playing = narrator.is_speaking();
    }

    /// Follow the narrator: an utterance that ended on its own clears playing
    pub fn sync(&mut self, speaking: bool) {
        self.playing &= speaking;
    }

    pub fn stop(&mut self, narrator: &dyn Narrator) {
        narrator.cancel();
        self.playing = false;
    }

    pub fn toggle(&mut self, narrator: &dyn Narrator) {
        if self.playing {
            self.stop(narrator);
        } else {
            self.listen(narrator);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::narration::testing::RecordingNarrator;
    use crate::narration::SilentNarrator;

    #[test]
    fn timeline_is_chronological() {
        assert!(MILESTONES.windows(2).all(|w| w[0].year < w[1].year));
        assert_eq!(MILESTONES[0].year, 2009);
        assert_eq!(MILESTONES[5].year, 2025);
    }

    #[test]
    fn listen_cancels_then_speaks() {
        let narrator = RecordingNarrator::default();
        let mut story = StoryView::new();
        story.select(1);
        story.listen(&narrator);
        assert!(story.is_playing());
        assert_eq!(narrator.cancel_count(), 1);
        assert_eq!(
            narrator.lines(),
            vec![
                "In 2010, First Enrollment. Ranjana Sonawane from Maharashtra becomes the first \
                 person to enroll for Aadhaar. The historic moment when India began its journey \
                 towards digital identity for all."
                    .to_string()
            ]
        );
    }

    #[test]
    fn toggle_alternates_listen_and_stop() {
        let narrator = RecordingNarrator::default();
        let mut story = StoryView::new();
        story.toggle(&narrator);
        story.toggle(&narrator);
        assert!(!story.is_playing());
        assert_eq!(narrator.lines().len(), 1);
        assert_eq!(narrator.cancel_count(), 2);
    }

    #[test]
    fn finished_narration_lets_enter_listen_again() {
        let narrator = RecordingNarrator::default();
        let mut story = StoryView::new();
        story.toggle(&narrator);
        assert!(story.is_playing());

        narrator.finish();
        story.sync(narrator.is_speaking());
        assert!(!story.is_playing());

        story.toggle(&narrator);
        assert!(story.is_playing());
        assert_eq!(narrator.lines().len(), 2);
    }

    #[test]
    fn muted_narration_never_plays() {
        let mut story = StoryView::new();
        story.listen(&SilentNarrator);
        assert!(!story.is_playing());
        story.toggle(&SilentNarrator);
        assert!(!story.is_playing());
    }

    #[test]
    fn selection_is_clamped() {
        let mut story = StoryView::new();
        story.select_prev();
        assert_eq!(story.selected(), 0);
        story.select(42);
        assert_eq!(story.selected(), 0);
        for _ in 0..10 {
            story.select_next();
        }
        assert_eq!(story.milestone().year, 2025);
    }
}
