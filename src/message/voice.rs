/// A channel voice message: a [`VoiceEvent`] addressed to one of the 16 channels.
///
/// Channels are zero based here (`0..=15`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelVoiceMessage {
    channel: u8,
    event: VoiceEvent,
}

impl ChannelVoiceMessage {
    /// Create a new message. The channel is masked to its low nibble.
    pub const fn new(channel: u8, event: VoiceEvent) -> Self {
        Self {
            channel: channel & 0x0F,
            event,
        }
    }
    /// The zero based channel
    pub const fn channel(&self) -> u8 {
        self.channel
    }
    /// The event
    pub const fn event(&self) -> &VoiceEvent {
        &self.event
    }
}

/// The body of a [`ChannelVoiceMessage`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VoiceEvent {
    /// Stop playing a note (`8n`)
    NoteOff {
        /// Key number
        note: u8,
        /// Release velocity
        velocity: u8,
    },
    /// Start playing a note (`9n`)
    NoteOn {
        /// Key number
        note: u8,
        /// Attack velocity. Zero is conventionally a note off.
        velocity: u8,
    },
    /// Polyphonic key pressure (`An`)
    Aftertouch {
        /// Key number
        note: u8,
        /// Pressure amount
        pressure: u8,
    },
    /// Controller change (`Bn`)
    ControlChange {
        /// Controller number
        controller: u8,
        /// New value
        value: u8,
    },
    /// Program change (`Cn`)
    ProgramChange {
        /// Program number
        program: u8,
    },
    /// Channel pressure (`Dn`)
    ChannelPressure {
        /// Pressure amount
        pressure: u8,
    },
    /// Pitch wheel (`En`)
    PitchBend {
        /// 14-bit wheel position, `8192` is centred.
        value: u16,
    },
}

impl VoiceEvent {
    /// The centre position of the pitch wheel
    pub const PITCH_CENTER: u16 = 8192;
}

impl From<midly::MidiMessage> for VoiceEvent {
    fn from(value: midly::MidiMessage) -> Self {
        use midly::MidiMessage::*;
        match value {
            NoteOff { key, vel } => Self::NoteOff {
                note: key.as_int(),
                velocity: vel.as_int(),
            },
            NoteOn { key, vel } => Self::NoteOn {
                note: key.as_int(),
                velocity: vel.as_int(),
            },
            Aftertouch { key, vel } => Self::Aftertouch {
                note: key.as_int(),
                pressure: vel.as_int(),
            },
            Controller { controller, value } => Self::ControlChange {
                controller: controller.as_int(),
                value: value.as_int(),
            },
            ProgramChange { program } => Self::ProgramChange {
                program: program.as_int(),
            },
            ChannelAftertouch { vel } => Self::ChannelPressure {
                pressure: vel.as_int(),
            },
            PitchBend { bend } => Self::PitchBend {
                value: bend.0.as_int(),
            },
        }
    }
}
