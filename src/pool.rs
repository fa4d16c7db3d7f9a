use alloc::collections::VecDeque;

use crate::{ItemTemplate, ItemView};

/// FIFO of inactive instances plus a count of every instance ever created.
#[derive(Debug)]
pub(crate) struct ItemPool<T> {
    free: VecDeque<T>,
    created: usize,
}

impl<T: ItemView> ItemPool<T> {
    pub(crate) fn new() -> Self {
        Self {
            free: VecDeque::new(),
            created: 0,
        }
    }

    /// Pops the oldest pooled instance, or builds a new one from `template`, and activates it.
    pub(crate) fn acquire(&mut self, template: &mut ItemTemplate<T>) -> T {
        let mut item = match self.free.pop_front() {
            Some(item) => item,
            None => {
                self.created = self.created.saturating_add(1);
                template.instantiate()
            }
        };
        item.set_active(true);
        item
    }

    pub(crate) fn release(&mut self, mut item: T) {
        item.set_active(false);
        self.free.push_back(item);
    }

    pub(crate) fn len(&self) -> usize {
        self.free.len()
    }

    pub(crate) fn created(&self) -> usize {
        self.created
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Size, Vec2};

    #[derive(Debug)]
    struct Node {
        id: usize,
        active: bool,
    }

    impl ItemView for Node {
        fn set_active(&mut self, active: bool) {
            self.active = active;
        }
        fn set_position(&mut self, _position: Vec2) {}
    }

    fn template() -> ItemTemplate<Node> {
        let mut next = 0;
        ItemTemplate::new(Size::new(10.0, 10.0), move || {
            next += 1;
            Node {
                id: next,
                active: false,
            }
        })
    }

    #[test]
    fn reuses_released_instances_in_fifo_order() {
        let mut tpl = template();
        let mut pool = ItemPool::new();

        let a = pool.acquire(&mut tpl);
        let b = pool.acquire(&mut tpl);
        assert!(a.active && b.active);
        assert_eq!(pool.created(), 2);

        pool.release(a);
        pool.release(b);
        assert_eq!(pool.len(), 2);

        let first = pool.acquire(&mut tpl);
        assert_eq!(first.id, 1);
        assert!(first.active);
        assert_eq!(pool.created(), 2);
        assert_eq!(pool.len(), 1);
    }
}
