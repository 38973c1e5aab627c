//! Circular delay line with exact and fractional reads.

/*
Delay Line
==========

A delay line remembers the last N samples written to it. Reading "d samples
ago" is the basic building block of echoes, chorus, comb filters and
physical models like the plucked string.

Vocabulary
----------

  capacity      Number of samples the buffer holds. Rounded up to a power
                of two so wrapping is a single bitwise AND.

  write cursor  Index of the slot that receives the next write.

  offset        How far behind the most recent write to read. Offset 0 is
                the sample that was written last.

  fractional    A delay that is not a whole number of samples. We blend the
  delay         two neighbouring samples (linear interpolation).


Layout
------

         oldest                 newest
           │                      │
    ┌───┬───┬───┬───┬───┬───┬───┬───┐
    │   │ a │ b │ c │ d │ e │ f │ g │   write cursor → next slot after g
    └───┴───┴───┴───┴───┴───┴───┴───┘

    read_exact(0) = g, read_exact(1) = f, ...
    read_fractional(1.25) = 0.75 * f + 0.25 * e


Allocation
----------

The buffer is allocated once, in `new`, and never resized. Everything after
construction (write, read, clear) is allocation-free and O(1) per sample, so
the delay line can live inside a voice that runs on the audio thread.
*/

pub struct DelayLine {
    buffer: Vec<f32>,
    mask: usize,
    write_pos: usize,
}

impl DelayLine {
    /// Allocate a delay line holding at least `min_capacity` samples.
    ///
    /// The real capacity is the next power of two (minimum 2).
    pub fn new(min_capacity: usize) -> Self {
        let capacity = min_capacity.max(2).next_power_of_two();

        Self {
            buffer: vec![0.0; capacity],
            mask: capacity - 1,
            write_pos: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Store `sample` at the cursor and advance the cursor.
    #[inline]
    pub fn write(&mut self, sample: f32) {
        self.buffer[self.write_pos] = sample;
        self.write_pos = (self.write_pos + 1) & self.mask;
    }

    /// Sample written `offset` writes ago (0 = most recent).
    ///
    /// Offsets past the capacity wrap instead of reading out of bounds.
    #[inline]
    pub fn read_exact(&self, offset: usize) -> f32 {
        // The most recent write sits one slot behind the cursor.
        let index = self
            .write_pos
            .wrapping_sub(1)
            .wrapping_sub(offset & self.mask)
            & self.mask;
        self.buffer[index]
    }

    /// Linearly interpolated read `delay` samples behind the newest write.
    ///
    /// Negative and NaN delays read as 0. Delays are wrapped modulo the
    /// capacity.
    ///
    /// # Example
    /// ```
    /// use pluck_dsp::dsp::delay::DelayLine;
    /// let mut line = DelayLine::new(8);
    /// line.write(1.0);
    /// line.write(0.0);
    /// assert!((line.read_fractional(0.25) - 0.25).abs() < 1e-6);
    /// ```
    #[inline]
    pub fn read_fractional(&self, delay: f32) -> f32 {
        let delay = if delay > 0.0 { delay } else { 0.0 };
        let whole = delay as usize;
        let frac = delay - whole as f32;

        let s0 = self.read_exact(whole);
        let s1 = self.read_exact(whole + 1);
        s0 + (s1 - s0) * frac
    }

    /// Zero the contents and rewind the cursor.
    pub fn clear(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
    }
}
