use crate::event::Event;
use std::collections::VecDeque;

//fifo queue of events shared by all components
//single-threaded, so pop is non-blocking: an empty queue yields None,
//which ends the driver's drain sub-loop
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<Event>,
}

impl EventQueue {
    pub fn new() -> Self {
        EventQueue {
            events: VecDeque::new(),
        }
    }

    //pushes an event onto the back of the queue
    pub fn push(&mut self, event: Event) {
        self.events.push_back(event);
    }

    //pops the oldest event, or None when the queue is empty
    pub fn pop(&mut self) -> Option<Event> {
        self.events.pop_front()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
