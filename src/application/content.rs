//! Static announcement content posted by the club commands

use crate::domain::entities::{Attachment, Embed, OutboundMessage};

/// Embed colour shared by every introduction embed
pub const EMBED_COLOR: u32 = 0x3498db;

/// A fixed embed definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbedSpec {
    pub title: &'static str,
    pub description: &'static str,
}

impl EmbedSpec {
    pub fn build(&self) -> Embed {
        Embed::new(self.title, self.description, EMBED_COLOR)
    }
}

pub const SIGNUP_LINES: [&str; 8] = [
    "# 👨‍💻 **Sign up for DDSC!!!**",
    "If you haven't signed up to be a member of the **Deakin Data Science Club** yet, please do so by clicking the link below!",
    "## 🤔 **Why Sign Up?**",
    "- Access to exclusive events and workshops.",
    "- Connect with like-minded individuals passionate about data science.",
    "- Enhance your skills and knowledge through our resources and community.",
    "# 📌 **Sign Up Now!**",
    "[**Click here to sign up!**](https://www.dusa.org.au/clubs/deakin-data-science-club-burwood-ddsc)",
];

pub const INTRODUCTION_HEADING: &str = "# 👨‍💻 **Welcome to Deakin Data Science Club!!**";

pub const WHO_WE_ARE: EmbedSpec = EmbedSpec {
    title: "👋 **Who Are We?**",
    description: "We are **Deakin Data Science Club (DDSC)**, Deakin University's representative student society for **data science, AI and analytics**! We are here to support you on your journey to explore, collaborate with others, and maximise your potential in this rapidly growing field.",
};

pub const VISION_MISSION_VALUES: EmbedSpec = EmbedSpec {
    title: "🌟 **Vision, Mission, and Values**",
    description: "**Vision:** To be the most impactful and engaging student-run data science organisation in Australia, inspiring the next generation of AI and data leaders.\n\n**Mission:** To equip students with the practical skills, professional networks and community support needed to thrive in data science, AI and analytics.\n\n**Values:** Commitment, Communication, Curiosity, Competence.",
};

pub const OBJECTIVES: EmbedSpec = EmbedSpec {
    title: "🎯 **Objectives and Goals**",
    description: "🔥 To promote interest in data science, AI and analytics among Deakin students by creating a platform for knowledge exchange and engagement.\n\n🔥 To provide employability resources and guidance for students interested in data science, AI, and computing fields, including networking events, hackathons, and job opportunity notices.\n\n🔥 To support the development of programming skills from beginner to intermediate levels through workshops, classes, and resources.\n\n🔥 To create collaborative opportunities among students working on data science, AI, and computing projects, encouraging peer learning and teamwork.",
};

pub const LINKS: EmbedSpec = EmbedSpec {
    title: "🔗 **Learn More About Us!**",
    description: "🌲 [**Our Linktree**](https://linktr.ee/deakindatascienceclub)\n🌐 [**Our Website**](https://ddsclub.org/)\n📷 [**Our Instagram**](https://www.instagram.com/deakin_dsc/)",
};

/// Embeds following the one that carries the logo, in posting order
pub const INTRODUCTION_FOLLOW_UPS: [EmbedSpec; 3] = [VISION_MISSION_VALUES, OBJECTIVES, LINKS];

pub fn signup_text() -> String {
    SIGNUP_LINES.join("\n")
}

pub fn signup_messages() -> Vec<OutboundMessage> {
    vec![OutboundMessage::text(signup_text())]
}

/// Heading, the logo-bearing embed, then the remaining embeds
pub fn introduction_messages(logo: Attachment) -> Vec<OutboundMessage> {
    let mut messages = Vec::with_capacity(2 + INTRODUCTION_FOLLOW_UPS.len());
    messages.push(OutboundMessage::text(INTRODUCTION_HEADING));
    messages.push(
        OutboundMessage::embed(WHO_WE_ARE.build().with_thumbnail(logo.thumbnail()))
            .with_attachment(logo),
    );
    messages.extend(
        INTRODUCTION_FOLLOW_UPS
            .iter()
            .map(|spec| OutboundMessage::embed(spec.build())),
    );
    messages
}
