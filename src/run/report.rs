use std::fmt::{self, Display, Formatter};
use std::time::Duration;

use crate::session::Session;

/// Counts and duration copied out of one finished session.
#[derive(Clone, Debug)]
pub struct SessionReport {
    /// Resolved label and final count per event, in catalog order.
    pub entries: Vec<(String, u64)>,
    pub duration: Duration,
}

impl SessionReport {
    pub(crate) fn new(session: &Session) -> Self {
        let entries = session
            .events()
            .iter()
            .zip(session.counts())
            .map(|(event, &count)| (event.label().to_owned(), count))
            .collect();
        Self {
            entries,
            duration: session.duration(),
        }
    }
}

/// Aggregated result of one workload run.
#[derive(Clone, Debug)]
pub struct RunReport {
    pub case: String,
    pub sessions: Vec<SessionReport>,
    pub min: Duration,
    pub max: Duration,
    pub mean: Duration,
}

fn ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1e3
}

impl Display for RunReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.case)?;
        for session in &self.sessions {
            writeln!(f, "-----------------------")?;
            for (label, count) in &session.entries {
                writeln!(f, "    {label:<24}: {count:>16}")?;
            }
        }
        writeln!(f, "-----------------------")?;

        if self.sessions.len() > 1 {
            writeln!(f, "finished with {} runs:", self.sessions.len())?;
            writeln!(f, "    min time: {:.3} ms", ms(self.min))?;
            writeln!(f, "    max time: {:.3} ms", ms(self.max))?;
            writeln!(f, "    avg time: {:.3} ms", ms(self.mean))?;
        } else {
            writeln!(f, "time: {:.3} ms", ms(self.mean))?;
        }

        Ok(())
    }
}
