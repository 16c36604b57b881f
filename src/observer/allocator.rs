//! Tensor allocation for observers.
//!
//! Observers do not own output memory. They ask a `TensorAllocator` for a
//! named, shaped field and fill the returned `TensorView`:
//! - `ContiguousAllocator` packs fields back to back into one fixed buffer
//! - `FieldAllocator` keeps every field in its own buffer, by name

use log::trace;
use smallvec::SmallVec;

/// Hands out writable tensor fields.
pub trait TensorAllocator {
    /// Reserve a zeroed field of the given shape.
    fn get(&mut self, name: &str, shape: &[usize]) -> TensorView<'_>;
}

/// Row-major writable view of one field.
///
/// The backing slice may be shorter than the shape implies when the
/// allocator ran out of room; writes past its end are dropped.
#[derive(Debug)]
pub struct TensorView<'a> {
    shape: SmallVec<[usize; 3]>,
    data: &'a mut [f32],
}

impl<'a> TensorView<'a> {
    /// Wrap a slice as a field of the given shape.
    pub fn new(shape: &[usize], data: &'a mut [f32]) -> Self {
        Self {
            shape: SmallVec::from_slice(shape),
            data,
        }
    }

    #[must_use]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of elements actually backed by memory.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Write `value` at a multi-dimensional index.
    ///
    /// Returns false if the element falls outside the backing memory.
    pub fn set(&mut self, index: &[usize], value: f32) -> bool {
        debug_assert_eq!(index.len(), self.shape.len());
        debug_assert!(index.iter().zip(self.shape.iter()).all(|(i, d)| i < d));

        let flat = index
            .iter()
            .zip(self.shape.iter())
            .fold(0, |acc, (&i, &dim)| acc * dim + i);

        match self.data.get_mut(flat) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }
}

fn element_count(shape: &[usize]) -> usize {
    shape.iter().product()
}

/// Packs fields contiguously into a caller-provided buffer.
///
/// The buffer is zeroed on construction. A field that does not fit is
/// clipped to the remaining room; later fields get no room at all.
#[derive(Debug)]
pub struct ContiguousAllocator<'a> {
    data: &'a mut [f32],
    offset: usize,
}

impl<'a> ContiguousAllocator<'a> {
    pub fn new(data: &'a mut [f32]) -> Self {
        data.fill(0.0);
        Self { data, offset: 0 }
    }

    /// Elements requested so far (may exceed the buffer length).
    #[must_use]
    pub fn requested(&self) -> usize {
        self.offset
    }
}

impl TensorAllocator for ContiguousAllocator<'_> {
    fn get(&mut self, name: &str, shape: &[usize]) -> TensorView<'_> {
        let size = element_count(shape);
        let len = self.data.len();
        let start = self.offset.min(len);
        let end = (self.offset + size).min(len);
        if end - start < size {
            trace!(
                "field {} {:?} clipped to {} of {} elements",
                name,
                shape,
                end - start,
                size
            );
        }
        self.offset += size;
        TensorView::new(shape, &mut self.data[start..end])
    }
}

/// A named field held by `FieldAllocator`.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub name: String,
    pub shape: Vec<usize>,
    pub data: Vec<f32>,
}

/// Keeps each requested field whole, in request order.
#[derive(Clone, Debug, Default)]
pub struct FieldAllocator {
    fields: Vec<Field>,
}

impl FieldAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// All fields in request order.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }
}

impl TensorAllocator for FieldAllocator {
    fn get(&mut self, name: &str, shape: &[usize]) -> TensorView<'_> {
        let index = self.fields.len();
        self.fields.push(Field {
            name: name.to_string(),
            shape: shape.to_vec(),
            data: vec![0.0; element_count(shape)],
        });
        let field = &mut self.fields[index];
        TensorView::new(&field.shape, &mut field.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_row_major() {
        let mut data = vec![0.0; 6];
        let mut view = TensorView::new(&[2, 3], &mut data);

        assert!(view.set(&[1, 2], 1.0));
        assert!(view.set(&[0, 1], 0.5));
        assert_eq!(data, vec![0.0, 0.5, 0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_contiguous_packs_fields() {
        let mut buffer = vec![9.0; 6];
        let mut alloc = ContiguousAllocator::new(&mut buffer);

        alloc.get("a", &[2]).set(&[1], 1.0);
        alloc.get("b", &[2, 2]).set(&[1, 0], 2.0);
        assert_eq!(alloc.requested(), 6);

        assert_eq!(buffer, vec![0.0, 1.0, 0.0, 0.0, 2.0, 0.0]);
    }

    #[test]
    fn test_contiguous_clips_overflow() {
        let mut buffer = vec![0.0; 4];
        let mut alloc = ContiguousAllocator::new(&mut buffer);

        alloc.get("head", &[2]);
        let mut big = alloc.get("big", &[3, 2]);
        assert_eq!(big.capacity(), 2);
        assert!(big.set(&[0, 1], 1.0));
        assert!(!big.set(&[2, 1], 1.0));

        let mut none = alloc.get("tail", &[5]);
        assert_eq!(none.capacity(), 0);
        assert!(!none.set(&[0], 1.0));

        assert_eq!(buffer, vec![0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_field_allocator_keeps_fields_whole() {
        let mut alloc = FieldAllocator::new();
        alloc.get("points", &[2]).set(&[0], 3.5);
        alloc.get("wins", &[100, 2]).set(&[99, 1], 1.0);

        assert_eq!(alloc.fields().len(), 2);
        assert_eq!(alloc.field("points").unwrap().data, vec![3.5, 0.0]);

        let wins = alloc.field("wins").unwrap();
        assert_eq!(wins.shape, vec![100, 2]);
        assert_eq!(wins.data[199], 1.0);
        assert!(alloc.field("missing").is_none());
    }
}
