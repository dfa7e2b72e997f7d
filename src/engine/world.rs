// Reference snake world. The board wraps around at every edge.

use super::{Direction, Engine, GameStatus};

const INITIAL_SNAKE_LEN: u32 = 3;

/// Picks an index in `[0, n)`; `n` is never zero.
pub type RewardPicker = Box<dyn FnMut(usize) -> usize>;

pub struct World {
    width: u32,
    size: usize,
    body: Vec<u32>,
    direction: Direction,
    reward_cell: Option<u32>,
    status: Option<GameStatus>,
    epoch: u64,
    pick: RewardPicker,
}

impl World {
    /// Rewards are placed with browser / OS entropy.
    pub fn new(width: u32, snake_index: u32) -> Self {
        Self::with_reward_picker(width, snake_index, Box::new(crate::random::random_below))
    }

    pub fn with_reward_picker(width: u32, snake_index: u32, pick: RewardPicker) -> Self {
        let size = width as usize * width as usize;
        let row = snake_index / width;
        let col = snake_index % width;
        // Head first, the rest trailing to the left along the same row.
        let body = (0..INITIAL_SNAKE_LEN.min(width))
            .map(|i| row * width + (col + width - i) % width)
            .collect();
        let mut world = Self {
            width,
            size,
            body,
            direction: Direction::Down,
            reward_cell: None,
            status: None,
            epoch: 0,
            pick,
        };
        world.reward_cell = world.place_reward();
        world
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn head(&self) -> u32 {
        self.body[0]
    }

    fn place_reward(&mut self) -> Option<u32> {
        let free: Vec<u32> = (0..self.size as u32)
            .filter(|cell| !self.body.contains(cell))
            .collect();
        if free.is_empty() {
            return None;
        }
        let i = (self.pick)(free.len()).min(free.len() - 1);
        Some(free[i])
    }

    fn next_cell(&self, direction: Direction) -> u32 {
        let w = self.width;
        let head = self.head();
        let (row, col) = (head / w, head % w);
        let (row, col) = match direction {
            Direction::Up => ((row + w - 1) % w, col),
            Direction::Down => ((row + 1) % w, col),
            Direction::Left => (row, (col + w - 1) % w),
            Direction::Right => (row, (col + 1) % w),
        };
        row * w + col
    }
}

impl Engine for World {
    fn width(&self) -> u32 {
        self.width
    }

    fn start(&mut self) {
        if self.status.is_none() {
            self.status = Some(GameStatus::Playing);
        }
    }

    fn change_direction(&mut self, direction: Direction) {
        if self.status != Some(GameStatus::Playing) {
            return;
        }
        // Turning back onto the neck is not allowed.
        if self.body.get(1) == Some(&self.next_cell(direction)) {
            return;
        }
        self.direction = direction;
    }

    fn update(&mut self) {
        self.epoch += 1;
        if self.status != Some(GameStatus::Playing) {
            return;
        }

        let Some(&old_tail) = self.body.last() else {
            return;
        };
        let next = self.next_cell(self.direction);
        self.body.rotate_right(1);
        self.body[0] = next;

        if self.body[1..].contains(&next) {
            self.status = Some(GameStatus::Lost);
            return;
        }

        if self.reward_cell == Some(next) {
            self.body.push(old_tail);
            if self.body.len() >= self.size {
                self.reward_cell = None;
                self.status = Some(GameStatus::Won);
            } else {
                self.reward_cell = self.place_reward();
            }
        }
    }

    fn status(&self) -> Option<GameStatus> {
        self.status
    }

    fn status_text(&self) -> String {
        match self.status {
            Some(GameStatus::Won) => "You Won!",
            Some(GameStatus::Lost) => "You Lost!",
            Some(GameStatus::Playing) => "You Playing!",
            None => "None!",
        }
        .to_string()
    }

    fn snake_cells(&self) -> &[u32] {
        &self.body
    }

    fn snake_length(&self) -> usize {
        self.body.len()
    }

    fn reward_cell(&self) -> Option<u32> {
        self.reward_cell
    }

    fn epoch(&self) -> u64 {
        self.epoch
    }
}
