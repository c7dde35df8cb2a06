#![doc = r#"
Decoded messages as the scheduler sees them

# Hierarchy
```text
                      |--------------|
                      | TrackMessage |
                      |--------------|
                     /       |        \
|---------------------|  |-------|  |---------------|
| ChannelVoiceMessage |  | Meta  |  | SystemExclusive|
|---------------------|  |-------|  |---------------|
```

Running status never shows up here: a message that reused the previous status
byte is stored with the kind it implies.
"#]

mod voice;
pub use voice::*;

mod meta;
pub use meta::*;

/// A single message from a track chunk, already decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrackMessage {
    /// A channel voice message
    ChannelVoice(ChannelVoiceMessage),
    /// A meta-event (`FF`)
    Meta(MetaMessage),
    /// A system exclusive message (`F0` or `F7` escape), without the status byte
    SystemExclusive(Vec<u8>),
}

impl TrackMessage {
    /// Shorthand for a channel voice message
    pub const fn voice(channel: u8, event: VoiceEvent) -> Self {
        Self::ChannelVoice(ChannelVoiceMessage::new(channel, event))
    }

    /// Returns the tempo if this is a set-tempo meta-event.
    pub const fn tempo(&self) -> Option<crate::time::Tempo> {
        match self {
            Self::Meta(MetaMessage::Tempo(tempo)) => Some(*tempo),
            _ => None,
        }
    }

    /// True for the end-of-track meta-event
    pub const fn is_end_of_track(&self) -> bool {
        matches!(self, Self::Meta(MetaMessage::EndOfTrack))
    }
}

impl From<ChannelVoiceMessage> for TrackMessage {
    fn from(value: ChannelVoiceMessage) -> Self {
        Self::ChannelVoice(value)
    }
}

impl From<MetaMessage> for TrackMessage {
    fn from(value: MetaMessage) -> Self {
        Self::Meta(value)
    }
}

impl From<midly::TrackEventKind<'_>> for TrackMessage {
    fn from(value: midly::TrackEventKind<'_>) -> Self {
        use midly::TrackEventKind;
        match value {
            TrackEventKind::Midi { channel, message } => {
                Self::voice(channel.as_int(), VoiceEvent::from(message))
            }
            TrackEventKind::SysEx(data) | TrackEventKind::Escape(data) => {
                Self::SystemExclusive(data.to_vec())
            }
            TrackEventKind::Meta(meta) => Self::Meta(MetaMessage::from(meta)),
        }
    }
}
