//! Framed byte channel between the processing thread and the worker thread.
//!
//! Each direction is an `rtrb` ring of bytes. A logical message is one frame:
//!
//! ```text
//! [ u32 size (native endian) ][ size bytes of payload ]
//! ```
//!
//! Writers commit a whole frame at once and readers only consume a frame once
//! the header and all of its payload are readable. A reader looking at a
//! partial frame sees "nothing yet" and leaves every byte in place.
//!
//! The producer and consumer halves are separate owned values, so the
//! single-producer/single-consumer rule is enforced by moving each half to the
//! one thread that uses it.

use rtrb::{Consumer, Producer, RingBuffer};

use crate::error::ChannelError;

/// Size of the frame length header in bytes.
pub const HEADER_LEN: usize = std::mem::size_of::<u32>();

/// Create a channel holding at most `capacity` bytes, headers included.
pub fn channel(capacity: usize) -> (FrameWriter, FrameReader) {
    let (producer, consumer) = RingBuffer::<u8>::new(capacity);
    (FrameWriter { producer }, FrameReader { consumer })
}

/// Writing half of a Work Channel.
pub struct FrameWriter {
    producer: Producer<u8>,
}

impl FrameWriter {
    pub fn capacity(&self) -> usize {
        self.producer.buffer().capacity()
    }

    /// Bytes that can be written right now.
    pub fn write_space(&self) -> usize {
        self.producer.slots()
    }

    /// Write raw bytes. Either all of `bytes` are written or none.
    pub fn write(&mut self, bytes: &[u8]) -> Result<(), ChannelError> {
        self.write_parts(&[], bytes)
    }

    /// Write `payload` as a single frame, header included, in one commit.
    pub fn write_frame(&mut self, payload: &[u8]) -> Result<(), ChannelError> {
        let size = u32::try_from(payload.len())
            .map_err(|_| ChannelError::FrameTooLarge(payload.len()))?;
        if HEADER_LEN + payload.len() > self.capacity() {
            return Err(ChannelError::FrameTooLarge(payload.len()));
        }

        self.write_parts(&size.to_ne_bytes(), payload)
    }

    fn write_parts(&mut self, head: &[u8], body: &[u8]) -> Result<(), ChannelError> {
        let requested = head.len() + body.len();
        let available = self.producer.slots();
        if requested > available {
            return Err(ChannelError::InsufficientSpace {
                requested,
                available,
            });
        }
        if requested == 0 {
            return Ok(());
        }

        let mut chunk = self
            .producer
            .write_chunk(requested)
            .map_err(|_| ChannelError::InsufficientSpace {
                requested,
                available,
            })?;

        let (first, second) = chunk.as_mut_slices();
        let source = head.iter().chain(body.iter());
        for (slot, byte) in first.iter_mut().chain(second.iter_mut()).zip(source) {
            *slot = *byte;
        }
        chunk.commit_all();

        Ok(())
    }
}

/// Reading half of a Work Channel.
pub struct FrameReader {
    consumer: Consumer<u8>,
}

impl FrameReader {
    pub fn capacity(&self) -> usize {
        self.consumer.buffer().capacity()
    }

    /// Bytes that can be read right now.
    pub fn read_space(&self) -> usize {
        self.consumer.slots()
    }

    /// Fill `buf` completely from the channel, or read nothing.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<(), ChannelError> {
        let requested = buf.len();
        let available = self.consumer.slots();
        if requested > available {
            return Err(ChannelError::InsufficientData {
                requested,
                available,
            });
        }
        if requested == 0 {
            return Ok(());
        }

        let chunk = self
            .consumer
            .read_chunk(requested)
            .map_err(|_| ChannelError::InsufficientData {
                requested,
                available,
            })?;

        let (first, second) = chunk.as_slices();
        buf[..first.len()].copy_from_slice(first);
        buf[first.len()..].copy_from_slice(second);
        chunk.commit_all();

        Ok(())
    }

    /// Payload length of the next frame, if that frame is complete.
    ///
    /// Nothing is consumed.
    pub fn pending_frame_len(&mut self) -> Option<usize> {
        let available = self.consumer.slots();
        if available < HEADER_LEN {
            return None;
        }

        let mut header = [0u8; HEADER_LEN];
        {
            // Dropped without commit, so the header stays in the ring
            let chunk = self.consumer.read_chunk(HEADER_LEN).ok()?;
            let (first, second) = chunk.as_slices();
            header[..first.len()].copy_from_slice(first);
            header[first.len()..].copy_from_slice(second);
        }

        let size = u32::from_ne_bytes(header) as usize;
        if available < HEADER_LEN + size {
            // Writer is not done with this frame yet
            return None;
        }
        Some(size)
    }

    /// Consume the next complete frame into `buf` and return its payload.
    ///
    /// Returns `None` without consuming anything when no complete frame is
    /// available. `buf` only reallocates if its capacity is below the payload
    /// length.
    pub fn read_frame<'a>(&mut self, buf: &'a mut Vec<u8>) -> Option<&'a [u8]> {
        let size = self.pending_frame_len()?;

        let chunk = self.consumer.read_chunk(HEADER_LEN + size).ok()?;
        let (first, second) = chunk.as_slices();

        buf.clear();
        buf.extend(first.iter().chain(second.iter()).skip(HEADER_LEN).copied());
        chunk.commit_all();

        Some(&buf[..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_round_trip_preserves_payload() {
        let (mut tx, mut rx) = channel(64);
        let payload = [1u8, 2, 3, 4, 5, 6, 7];

        tx.write_frame(&payload).unwrap();
        assert_eq!(rx.read_space(), HEADER_LEN + payload.len());
        assert_eq!(rx.pending_frame_len(), Some(payload.len()));

        let mut buf = Vec::new();
        let read = rx.read_frame(&mut buf).unwrap();
        assert_eq!(read, &payload);
        assert_eq!(rx.read_space(), 0);
    }

    #[test]
    fn empty_payload_is_a_valid_frame() {
        let (mut tx, mut rx) = channel(16);
        tx.write_frame(&[]).unwrap();

        let mut buf = vec![9u8; 4];
        assert_eq!(rx.read_frame(&mut buf), Some(&[][..]));
        assert_eq!(rx.read_space(), 0);
    }

    #[test]
    fn oversized_frame_fails_without_writing() {
        let (mut tx, mut rx) = channel(16);
        tx.write_frame(&[7u8; 4]).unwrap();
        let space_before = tx.write_space();

        // 8 + 4 header > 8 bytes left
        let err = tx.write_frame(&[0u8; 8]).unwrap_err();
        assert_eq!(
            err,
            ChannelError::InsufficientSpace {
                requested: 12,
                available: space_before
            }
        );
        assert_eq!(tx.write_space(), space_before);

        let mut buf = Vec::new();
        assert_eq!(rx.read_frame(&mut buf), Some(&[7u8; 4][..]));
        assert_eq!(rx.read_frame(&mut buf), None);
    }

    #[test]
    fn frame_larger_than_capacity_is_rejected() {
        let (mut tx, _rx) = channel(8);
        assert_eq!(
            tx.write_frame(&[0u8; 5]),
            Err(ChannelError::FrameTooLarge(5))
        );
        assert_eq!(tx.write_space(), 8);
    }

    #[test]
    fn partial_frame_reads_as_empty() {
        let (mut tx, mut rx) = channel(32);
        let payload = [0xAAu8; 6];

        // Header alone, payload not yet written
        tx.write(&(payload.len() as u32).to_ne_bytes()).unwrap();
        assert_eq!(rx.pending_frame_len(), None);

        let mut buf = Vec::new();
        assert_eq!(rx.read_frame(&mut buf), None);
        assert_eq!(rx.read_space(), HEADER_LEN, "header must not be consumed");

        tx.write(&payload[..3]).unwrap();
        assert_eq!(rx.pending_frame_len(), None);

        tx.write(&payload[3..]).unwrap();
        assert_eq!(rx.read_frame(&mut buf), Some(&payload[..]));
    }

    #[test]
    fn frames_wrap_around_the_ring() {
        let (mut tx, mut rx) = channel(20);
        let mut buf = Vec::with_capacity(20);

        for round in 0..10u8 {
            let payload = [round; 9];
            tx.write_frame(&payload).unwrap();
            assert_eq!(rx.read_frame(&mut buf), Some(&payload[..]));
        }
    }

    #[test]
    fn raw_read_is_all_or_nothing() {
        let (mut tx, mut rx) = channel(8);
        tx.write(&[1, 2, 3]).unwrap();

        let mut big = [0u8; 4];
        assert_eq!(
            rx.read(&mut big),
            Err(ChannelError::InsufficientData {
                requested: 4,
                available: 3
            })
        );
        assert_eq!(rx.read_space(), 3);

        let mut small = [0u8; 3];
        rx.read(&mut small).unwrap();
        assert_eq!(small, [1, 2, 3]);
    }

    #[test]
    fn raw_write_is_all_or_nothing() {
        let (mut tx, rx) = channel(4);
        assert!(tx.write(&[0u8; 5]).is_err());
        assert_eq!(rx.read_space(), 0);
        tx.write(&[0u8; 4]).unwrap();
        assert_eq!(tx.write_space(), 0);
    }
}
