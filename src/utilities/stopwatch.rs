use std::time::{Duration, Instant};

#[derive(Copy, Clone, Debug)]
pub struct Stopwatch {
    duration: Duration,
    last_instant: Option<Instant>,
    is_running: bool,
}

impl Stopwatch {
    pub fn new() -> Stopwatch {
        Stopwatch {
            duration: Duration::from_secs(0),
            last_instant: None,
            is_running: false,
        }
    }

    pub fn started() -> Stopwatch {
        let mut stopwatch = Stopwatch::new();
        stopwatch.start();
        stopwatch
    }

    fn start(&mut self) {
        self.update_time();
        self.is_running = true;
    }

    pub fn read(&mut self) -> Duration {
        self.update_time();
        self.duration
    }

    fn update_time(&mut self) {
        if let (Some(last_instant), true) = (self.last_instant, self.is_running) {
            self.duration += last_instant.elapsed();
        }

        self.last_instant = Some(Instant::now());
    }
}

/**
 * Wall-clock allowance for one solver run.
 *
 * Without a limit the budget never runs out and solvers stop on their own criteria.
 */
#[derive(Copy, Clone, Debug)]
pub struct Budget {
    stopwatch: Stopwatch,
    limit: Option<Duration>,
}

impl Budget {
    pub fn new(limit: Option<Duration>) -> Budget {
        Budget {
            stopwatch: Stopwatch::started(),
            limit,
        }
    }

    pub fn unlimited() -> Budget {
        Budget::new(None)
    }

    pub fn is_exhausted(&mut self) -> bool {
        match self.limit {
            Some(limit) => self.stopwatch.read() >= limit,
            None => false,
        }
    }

    pub fn elapsed(&mut self) -> Duration {
        self.stopwatch.read()
    }
}
