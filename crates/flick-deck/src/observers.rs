use std::rc::Rc;

/// Deck observer slots. Each slot is independently optional. The swipe
/// observers receive the card that committed, before the deck advances;
/// `on_stack_empty` fires once per exhaustion edge.
pub struct DeckObservers<C> {
    pub on_swipe_left: Option<Rc<dyn Fn(&C)>>,
    pub on_swipe_right: Option<Rc<dyn Fn(&C)>>,
    pub on_stack_empty: Option<Rc<dyn Fn()>>,
}

impl<C> DeckObservers<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_swipe_left(mut self, callback: impl Fn(&C) + 'static) -> Self {
        self.on_swipe_left = Some(Rc::new(callback));
        self
    }

    pub fn on_swipe_right(mut self, callback: impl Fn(&C) + 'static) -> Self {
        self.on_swipe_right = Some(Rc::new(callback));
        self
    }

    pub fn on_stack_empty(mut self, callback: impl Fn() + 'static) -> Self {
        self.on_stack_empty = Some(Rc::new(callback));
        self
    }
}

impl<C> Default for DeckObservers<C> {
    fn default() -> Self {
        Self {
            on_swipe_left: None,
            on_swipe_right: None,
            on_stack_empty: None,
        }
    }
}

impl<C> Clone for DeckObservers<C> {
    fn clone(&self) -> Self {
        Self {
            on_swipe_left: self.on_swipe_left.clone(),
            on_swipe_right: self.on_swipe_right.clone(),
            on_stack_empty: self.on_stack_empty.clone(),
        }
    }
}
