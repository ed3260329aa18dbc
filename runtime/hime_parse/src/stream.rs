//! Rewindable stream of tokens over a lexer.

use hime_ir::Token;
use hime_lexer::TokenSource;
use tracing::trace;

/// Number of slots in the ring buffer.
///
/// At most `RING_SIZE - 1` tokens can be pending replay at once, since a
/// full ring would be indistinguishable from an empty one.
pub const RING_SIZE: usize = 32;

/// A token stream that can go back a bounded number of tokens.
///
/// Tokens pulled from the source are kept in a ring. After
/// [`rewind`](Self::rewind), [`next`](Self::next) replays them from the
/// ring; once they are exhausted it pulls from the source again.
///
/// ```text
///  ring:   [ t0 t1 t2 t3 t4 .. ]
///                 ^start   ^next
///  start == next: nothing to replay
///  start != next: t2, t3 replay before the source is asked again
/// ```
#[derive(Debug)]
pub struct RewindableTokenStream<S> {
    source: S,
    ring: [Token; RING_SIZE],
    /// Next slot to replay.
    start: usize,
    /// Next slot to write.
    next: usize,
    /// Tokens pulled from the source, saturating at the ring capacity.
    produced: usize,
}

impl<S: TokenSource> RewindableTokenStream<S> {
    pub fn new(source: S) -> Self {
        RewindableTokenStream {
            source,
            ring: [Token::EPSILON; RING_SIZE],
            start: 0,
            next: 0,
            produced: 0,
        }
    }

    /// Number of rewound tokens not yet replayed.
    #[inline]
    fn pending(&self) -> usize {
        (self.next + RING_SIZE - self.start) % RING_SIZE
    }

    /// How many more tokens [`rewind`](Self::rewind) currently accepts.
    #[inline]
    pub fn rewind_window(&self) -> usize {
        self.produced.min(RING_SIZE - 1) - self.pending()
    }

    /// The next token, replayed from the ring if any are pending.
    pub fn next(&mut self) -> Token {
        if self.start != self.next {
            let token = self.ring[self.start];
            self.start = (self.start + 1) % RING_SIZE;
            trace!(?token, pending = self.pending(), "replay");
            return token;
        }
        let token = self.source.next_token();
        self.ring[self.next] = token;
        self.next = (self.next + 1) % RING_SIZE;
        self.start = self.next;
        if self.produced < RING_SIZE {
            self.produced += 1;
        }
        token
    }

    /// Go back `count` tokens.
    ///
    /// # Panics
    /// Panics if `count` exceeds [`rewind_window`](Self::rewind_window):
    /// the tokens would have been overwritten or never existed.
    pub fn rewind(&mut self, count: usize) {
        let window = self.rewind_window();
        assert!(
            count <= window,
            "cannot rewind {count} tokens; only {window} can be replayed"
        );
        self.start = (self.start + RING_SIZE - count) % RING_SIZE;
        trace!(count, pending = self.pending(), "rewind");
    }

    #[inline]
    pub fn get_ref(&self) -> &S {
        &self.source
    }

    /// Give back the source. Pending tokens are dropped.
    pub fn into_inner(self) -> S {
        self.source
    }
}

impl<S: TokenSource> TokenSource for RewindableTokenStream<S> {
    #[inline]
    fn next_token(&mut self) -> Token {
        self.next()
    }
}
