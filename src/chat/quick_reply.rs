use serde::Serialize;

/// A fixed control that answers with a canned reply instead of calling the model.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct QuickReply {
    /// Stable identifier used in URLs.
    pub id: &'static str,
    /// Caption shown on the control.
    pub label: &'static str,
    /// What gets recorded as the user's turn.
    pub utterance: &'static str,
    pub response: &'static str,
}

pub static QUICK_REPLIES: [QuickReply; 5] = [
    QuickReply {
        id: "availability",
        label: "Is anyone available to chat?",
        utterance: "Is anyone available to chat?",
        response: "Yes! Welcome to Amber Salon. We are available to chat. How can we help you today?",
    },
    QuickReply {
        id: "booking",
        label: "Book appointment for haircut",
        utterance: "I want to book an appointment.",
        response: "Sure! To book your haircut appointment, please visit our website at www.ambersalon.com and fill in your basic details along with your preferred date and time. We’ll take care of the rest!",
    },
    QuickReply {
        id: "services",
        label: "What type of services do you offer?",
        utterance: "What type of services do you offer?",
        response: "We offer a wide range of services, including:\n\
                   - Haircuts\n\
                   - Manicures\n\
                   - Pedicures\n\
                   - Facials\n\
                   - Hair Coloring\n\
                   - Hair Treatments\n\
                   - Waxing\n\
                   - Makeup Services\n\
                   - Bridal Packages\n\
                   - Massage Therapy\n\
                   Let us know which service you're interested in!",
    },
    QuickReply {
        id: "hours",
        label: "What are your salon working hours?",
        utterance: "What are your salon working hours?",
        response: "Our salon is open Monday to Saturday from 9 AM to 7 PM, and on Sundays from 10 AM to 4 PM.",
    },
    QuickReply {
        id: "location",
        label: "Where are your offices located?",
        utterance: "Where is your salon located?",
        response: "We are located at 123 Amber Street, Kamloops, Canada. Come visit us anytime!",
    },
];

pub fn find(id: &str) -> Option<&'static QuickReply> {
    QUICK_REPLIES.iter().find(|reply| reply.id == id)
}

/// Looks a control up by its 1-based position on screen.
pub fn by_position(position: usize) -> Option<&'static QuickReply> {
    position.checked_sub(1).and_then(|index| QUICK_REPLIES.get(index))
}
