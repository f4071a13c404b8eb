//! Referee listener: drains the socket, deduplicates, and drives the match.
//!
//! Each cycle runs in three steps:
//!
//! 1. **Drain.** Read datagrams until the source reports `WouldBlock`. Only
//!    the last well-formed packet survives; earlier ones are superseded.
//! 2. **Counter check.** The packet is new data only if its command counter
//!    differs from the counter of the last accepted packet. Wraparound
//!    (255 to 0) is a difference like any other.
//! 3. **Command gate.** The command is applied to the match only if its byte
//!    differs from the last applied command byte. A repeated command under a
//!    fresh counter is accepted as new data but not re-applied.

use std::io::ErrorKind;
use std::time::Duration;

use refbox_match::{Effect, MatchState};
use refbox_protocol::{RefCommand, RefboxPacket, RefereeSignal};
use tracing::{debug, trace, warn};

use crate::DatagramSource;

/// Receive buffer size. Large enough for any UDP datagram.
pub const RECV_BUFFER_LEN: usize = 65536;

/// Memo of the most recently accepted packet's counter and command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LastCommand {
    pub command_counter: u8,
    pub command: u8,
}

/// Listens for referee packets and applies them to a [`MatchState`].
pub struct RefboxListener<S> {
    source: Option<S>,
    buf: Vec<u8>,
    last: LastCommand,
    last_packet: Option<RefboxPacket>,
}

impl<S: DatagramSource> RefboxListener<S> {
    /// Create a listener reading from `source`.
    pub fn new(source: S) -> Self {
        Self::with_source(Some(source))
    }

    /// Create a listener without a transport. It never observes data; this is
    /// what the application falls back to when the socket cannot be bound.
    pub fn detached() -> Self {
        Self::with_source(None)
    }

    fn with_source(source: Option<S>) -> Self {
        Self {
            source,
            buf: vec![0u8; RECV_BUFFER_LEN],
            last: LastCommand::default(),
            last_packet: None,
        }
    }

    /// Whether a transport is attached.
    pub fn is_attached(&self) -> bool {
        self.source.is_some()
    }

    /// Counter and command of the last accepted packet.
    pub fn last_command(&self) -> LastCommand {
        self.last
    }

    /// The last packet accepted as new data, including the referee box's own
    /// score and remaining-time fields.
    pub fn last_packet(&self) -> Option<RefboxPacket> {
        self.last_packet
    }

    /// Read every queued datagram and return the last well-formed packet.
    fn drain(&mut self) -> Option<RefboxPacket> {
        let source = self.source.as_mut()?;
        let mut latest = None;

        loop {
            match source.recv(&mut self.buf) {
                Ok(len) => match RefboxPacket::decode(&self.buf, len) {
                    Some(packet) => latest = Some(packet),
                    None => trace!(len, "ignoring datagram with unexpected length"),
                },
                Err(e) if e.kind() == ErrorKind::WouldBlock => break,
                Err(e) => {
                    warn!(error = %e, "referee socket read failed");
                    break;
                }
            }
        }

        latest
    }

    /// Drain the source and return the surviving packet if its counter is new.
    ///
    /// Does not update the last-seen memo; [`execute`](Self::execute) does
    /// that once the packet has been handled.
    pub fn poll(&mut self) -> Option<RefboxPacket> {
        let packet = self.drain()?;
        (packet.command_counter != self.last.command_counter).then_some(packet)
    }

    /// Run one listener cycle against `state`.
    ///
    /// Returns the packet accepted as new data, if any. The packet may still
    /// have been suppressed by the command gate.
    pub fn execute(&mut self, state: &mut MatchState) -> Option<RefboxPacket> {
        let packet = self.poll()?;

        debug!(
            command = %char::from(packet.command),
            counter = packet.command_counter,
            "got referee command"
        );
        self.apply_command(packet.command, state);

        self.last = LastCommand {
            command_counter: packet.command_counter,
            command: packet.command,
        };
        self.last_packet = Some(packet);
        Some(packet)
    }

    /// Apply `command` unless it repeats the last applied command byte.
    ///
    /// An accepted command is recorded on the match state before it is
    /// mapped, so consumers can see the raw command even when it is unknown.
    /// Returns the effects performed, or `None` when the command was
    /// suppressed.
    pub fn apply_command(&mut self, command: u8, state: &mut MatchState) -> Option<Vec<Effect>> {
        if command == self.last.command {
            trace!(command, "suppressing repeated referee command");
            return None;
        }
        self.last.command = command;

        let command = RefCommand::from_byte(command);
        debug!(?command, "referee command");
        state.set_refbox_command(command);
        Some(state.apply_signal(RefereeSignal::from_command(command)))
    }

    /// Poll forever, sleeping `interval` between cycles.
    ///
    /// `on_packet` is called after every cycle that accepted new data, with
    /// the match state already updated.
    pub fn run(
        &mut self,
        state: &mut MatchState,
        interval: Duration,
        mut on_packet: impl FnMut(&RefboxPacket, &MatchState),
    ) -> ! {
        debug!(?interval, attached = self.is_attached(), "referee listener running");
        loop {
            if let Some(packet) = self.execute(state) {
                on_packet(&packet, state);
            }
            std::thread::sleep(interval);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use refbox_match::{ClockId, PlayState};
    use refbox_protocol::Side;
    use std::collections::VecDeque;
    use std::io;

    /// In-memory source that replays a scripted sequence of reads.
    #[derive(Default)]
    struct ScriptedSource {
        reads: VecDeque<io::Result<Vec<u8>>>,
        calls: usize,
    }

    impl ScriptedSource {
        fn push(&mut self, bytes: &[u8]) {
            self.reads.push_back(Ok(bytes.to_vec()));
        }

        fn push_packet(&mut self, command: u8, counter: u8) {
            self.push(&[command, counter, 0, 0, 0, 0]);
        }

        fn push_error(&mut self, kind: ErrorKind) {
            self.reads.push_back(Err(io::Error::from(kind)));
        }
    }

    impl DatagramSource for ScriptedSource {
        fn recv(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.calls += 1;
            match self.reads.pop_front() {
                Some(Ok(bytes)) => {
                    buf[..bytes.len()].copy_from_slice(&bytes);
                    Ok(bytes.len())
                }
                Some(Err(e)) => Err(e),
                None => Err(io::Error::from(ErrorKind::WouldBlock)),
            }
        }
    }

    fn listener() -> RefboxListener<ScriptedSource> {
        RefboxListener::new(ScriptedSource::default())
    }

    fn source(listener: &mut RefboxListener<ScriptedSource>) -> &mut ScriptedSource {
        listener.source.as_mut().unwrap()
    }

    #[test]
    fn test_empty_queue_yields_nothing() {
        let mut l = listener();
        let mut state = MatchState::new();
        assert!(l.execute(&mut state).is_none());
        assert_eq!(l.last_command(), LastCommand::default());
    }

    #[test]
    fn test_drain_keeps_only_latest_packet() {
        let mut l = listener();
        source(&mut l).push_packet(b'k', 1);
        source(&mut l).push_packet(b'S', 2);
        source(&mut l).push_packet(b's', 3);

        let mut state = MatchState::new();
        let packet = l.execute(&mut state).unwrap();
        assert_eq!(packet.command, b's');
        assert_eq!(packet.command_counter, 3);
        assert_eq!(state.play_state(), PlayState::Running);
        // Three datagrams plus the terminating WouldBlock.
        assert_eq!(source(&mut l).calls, 4);
    }

    #[test]
    fn test_malformed_datagrams_are_skipped() {
        let mut l = listener();
        source(&mut l).push_packet(b's', 1);
        source(&mut l).push(&[b'H', 2, 0]);
        source(&mut l).push(&[b'H'; 7]);

        let mut state = MatchState::new();
        let packet = l.execute(&mut state).unwrap();
        assert_eq!(packet.command, b's');
    }

    #[test]
    fn test_only_malformed_datagrams_is_no_data() {
        let mut l = listener();
        source(&mut l).push(&[b's', 9]);
        let mut state = MatchState::new();
        assert!(l.execute(&mut state).is_none());
        assert_eq!(state.play_state(), PlayState::Halted);
    }

    #[test]
    fn test_same_counter_is_not_new_data() {
        let mut l = listener();
        let mut state = MatchState::new();

        source(&mut l).push_packet(b's', 5);
        assert!(l.execute(&mut state).is_some());

        source(&mut l).push_packet(b's', 5);
        assert!(l.execute(&mut state).is_none());
    }

    #[test]
    fn test_initial_counter_zero_is_not_new_data() {
        let mut l = listener();
        let mut state = MatchState::new();
        source(&mut l).push_packet(b's', 0);
        assert!(l.execute(&mut state).is_none());
        assert_eq!(state.play_state(), PlayState::Halted);
    }

    #[test]
    fn test_counter_wraparound_is_new_data() {
        let mut l = listener();
        let mut state = MatchState::new();

        source(&mut l).push_packet(b'k', 254);
        assert!(l.execute(&mut state).is_some());
        source(&mut l).push_packet(b'S', 255);
        assert!(l.execute(&mut state).is_some());
        source(&mut l).push_packet(b's', 0);
        let packet = l.execute(&mut state).unwrap();
        assert_eq!(packet.command_counter, 0);
        assert_eq!(state.play_state(), PlayState::Running);
    }

    #[test]
    fn test_repeated_command_under_new_counter_is_applied_once() {
        let mut l = listener();
        let mut state = MatchState::new();

        source(&mut l).push_packet(b'g', 1);
        l.execute(&mut state);
        source(&mut l).push_packet(b'g', 2);
        let packet = l.execute(&mut state);

        assert!(packet.is_some(), "new counter is still new data");
        assert_eq!(l.last_command().command_counter, 2);
        assert_eq!(state.score_a(), 1);
    }

    #[test]
    fn test_apply_command_reports_suppression() {
        let mut l = listener();
        let mut state = MatchState::new();
        assert!(l.apply_command(b'H', &mut state).is_some());
        assert!(l.apply_command(b'H', &mut state).is_none());
        assert!(l.apply_command(b'S', &mut state).is_some());
    }

    #[test]
    fn test_unknown_command_changes_nothing_but_is_remembered() {
        let mut l = listener();
        let mut state = MatchState::new();

        source(&mut l).push_packet(b'x', 1);
        assert!(l.execute(&mut state).is_some());
        assert_eq!(state.play_state(), PlayState::Halted);
        assert_eq!(state.score_a(), 0);
        assert_eq!(l.last_command().command, b'x');
        assert_eq!(state.refbox_command(), Some(RefCommand::Unknown(b'x')));
    }

    #[test]
    fn test_accepted_command_is_recorded_on_state() {
        let mut l = listener();
        let mut state = MatchState::new();
        assert_eq!(state.refbox_command(), None);

        source(&mut l).push_packet(b'K', 1);
        l.execute(&mut state);
        assert_eq!(state.refbox_command(), Some(RefCommand::KickoffBlue));
        assert_eq!(state.snapshot().refbox_command, Some(RefCommand::KickoffBlue));

        source(&mut l).push_packet(b's', 2);
        l.execute(&mut state);
        assert_eq!(state.refbox_command(), Some(RefCommand::Start));
    }

    #[test]
    fn test_suppressed_command_keeps_recorded_command() {
        let mut l = listener();
        let mut state = MatchState::new();
        assert!(l.apply_command(b'G', &mut state).is_some());
        state.set_refbox_command(RefCommand::Halt);
        assert!(l.apply_command(b'G', &mut state).is_none());
        assert_eq!(state.refbox_command(), Some(RefCommand::Halt));
        assert_eq!(state.score_b(), 1);
    }

    #[test]
    fn test_read_error_ends_drain_without_failing() {
        let mut l = listener();
        source(&mut l).push_packet(b's', 1);
        source(&mut l).push_error(ErrorKind::ConnectionRefused);
        source(&mut l).push_packet(b'H', 2);

        let mut state = MatchState::new();
        let packet = l.execute(&mut state).unwrap();
        assert_eq!(packet.command, b's');

        // The packet queued behind the error is picked up next cycle.
        let packet = l.execute(&mut state).unwrap();
        assert_eq!(packet.command, b'H');
        assert_eq!(state.play_state(), PlayState::Halted);
    }

    #[test]
    fn test_detached_listener_never_sees_data() {
        let mut l: RefboxListener<ScriptedSource> = RefboxListener::detached();
        let mut state = MatchState::new();
        assert!(!l.is_attached());
        assert!(l.execute(&mut state).is_none());
        assert!(l.last_packet().is_none());
    }

    #[test]
    fn test_last_packet_exposes_referee_fields() {
        let mut l = listener();
        let mut state = MatchState::new();
        source(&mut l).push(&[b'1', 4, 2, 3, 0x02, 0x58]);
        l.execute(&mut state);
        let packet = l.last_packet().unwrap();
        assert_eq!((packet.score_a, packet.score_b), (2, 3));
        assert_eq!(packet.time_remaining, 600);
    }

    #[test]
    fn test_packet_scores_line_up_with_match_sides() {
        let mut l = listener();
        let mut state = MatchState::new();

        // Blue scores: the referee box reports blue goals in byte 2.
        source(&mut l).push(&[b'G', 1, 1, 0, 0, 0]);
        l.execute(&mut state);
        let packet = l.last_packet().unwrap();
        assert_eq!(state.score_b(), 1);
        assert_eq!(packet.score_a, 1);
        assert_eq!(i32::from(packet.goals(Side::B)), state.score_b());
        assert_eq!(i32::from(packet.goals(Side::A)), state.score_a());
    }

    #[test]
    fn test_start_halt_ready_sequence() {
        let mut l = listener();
        let mut state = MatchState::new();
        let mut match_clock_starts = 0;

        for (counter, command) in [b's', b'H', b' '].into_iter().enumerate() {
            let before = state.match_clock().has_started();
            source(&mut l).push_packet(command, counter as u8 + 1);
            l.execute(&mut state).unwrap();
            if !before && state.clock(ClockId::Match).has_started() {
                match_clock_starts += 1;
            }
            match command {
                b's' => assert_eq!(state.play_state(), PlayState::Running),
                _ => assert_eq!(state.play_state(), PlayState::Halted),
            }
        }

        assert_eq!(match_clock_starts, 1);
        assert!(!state.match_clock().is_running());
    }
}
