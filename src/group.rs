//! Iterator adapter that cut a stream in variable length group.
//!
//! Each item is push in a buffer, when predicate is true on the last pushed item buffer is emit as a group.
//! Remaining item at end of stream are emit as a last group. Only one buffer is hold at a time.

/// Group item of an iterator until predicate is true, see [GroupUntilExt::group_until]
pub struct GroupUntil<I, F>
where
    I: Iterator,
{
    inner: I,
    predicate: F,
    buffer: Vec<I::Item>,
}

impl<I, F> Iterator for GroupUntil<I, F>
where
    I: Iterator,
    F: FnMut(&I::Item) -> bool,
{
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        for item in self.inner.by_ref() {
            let end = (self.predicate)(&item);
            self.buffer.push(item);

            if end {
                return Some(std::mem::take(&mut self.buffer));
            }
        }

        if self.buffer.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.buffer))
        }
    }
}

/// Group item of a fallible iterator until predicate is true, see [GroupUntilExt::try_group_until]
///
/// On error, buffered items are drop, error is emit and iteration stop.
pub struct TryGroupUntil<I, T, F> {
    inner: I,
    predicate: F,
    buffer: Vec<T>,
    failed: bool,
}

impl<I, T, E, F> Iterator for TryGroupUntil<I, T, F>
where
    I: Iterator<Item = Result<T, E>>,
    F: FnMut(&T) -> bool,
{
    type Item = Result<Vec<T>, E>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        for item in self.inner.by_ref() {
            match item {
                Ok(item) => {
                    let end = (self.predicate)(&item);
                    self.buffer.push(item);

                    if end {
                        return Some(Ok(std::mem::take(&mut self.buffer)));
                    }
                }
                Err(e) => {
                    self.buffer.clear();
                    self.failed = true;
                    return Some(Err(e));
                }
            }
        }

        if self.buffer.is_empty() {
            None
        } else {
            Some(Ok(std::mem::take(&mut self.buffer)))
        }
    }
}

pub trait GroupUntilExt: Iterator + Sized {
    fn group_until<F>(self, predicate: F) -> GroupUntil<Self, F>
    where
        F: FnMut(&Self::Item) -> bool,
    {
        GroupUntil {
            inner: self,
            predicate,
            buffer: Vec::new(),
        }
    }

    fn try_group_until<T, E, F>(self, predicate: F) -> TryGroupUntil<Self, T, F>
    where
        Self: Iterator<Item = Result<T, E>>,
        F: FnMut(&T) -> bool,
    {
        TryGroupUntil {
            inner: self,
            predicate,
            buffer: Vec::new(),
            failed: false,
        }
    }
}

impl<I> GroupUntilExt for I where I: Iterator {}
