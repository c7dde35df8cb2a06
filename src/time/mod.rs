#![doc = r#"
Time units shared by the reader and the scheduler

A MIDI file counts time in ticks. How long a tick lasts depends on the file's
[`Timing`](crate::reader::Timing) and, for musical timing, on the current [`Tempo`].
That relation is captured by [`TickDuration`].

The wall clock itself is abstracted by [`Clock`].
"#]

mod clock;
pub use clock::*;

mod smpte;
pub use smpte::*;

mod tempo;
pub use tempo::*;
