pub mod event;
pub mod participant;

pub use event::{headcount, Event, EventDetail, EventInput, EventSummary, ValidEvent};
pub use participant::{
    CreateParticipantRequest, Participant, ParticipantDraft, ParticipantType, ParticipantView,
    PaymentMethod, ValidParticipant,
};
