use super::stats::Stats;
use super::student::StudentRecord;
use chrono::NaiveDateTime;

/// Ordered list of students, in spreadsheet row order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    records: Vec<StudentRecord>,
}

impl Roster {
    pub fn new(records: Vec<StudentRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&StudentRecord> {
        self.records.get(idx)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StudentRecord> {
        self.records.iter()
    }

    /// Positions eligible for drawing: absent records in no-repeat mode,
    /// every record otherwise.
    pub fn eligible(&self, no_repeat: bool) -> Vec<usize> {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, r)| !no_repeat || !r.present)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn all_present(&self) -> bool {
        self.records.iter().all(|r| r.present)
    }

    /// First record whose trimmed id equals `id`.
    pub fn find_by_id(&self, id: &str) -> Option<usize> {
        let id = id.trim();
        self.records.iter().position(|r| r.id.trim() == id)
    }

    /// Record whose trimmed name equals `name`, only when exactly one matches.
    pub fn find_unique_by_name(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        let mut hits = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.name.trim() == name)
            .map(|(i, _)| i);

        match (hits.next(), hits.next()) {
            (Some(i), None) => Some(i),
            _ => None,
        }
    }

    /// Rows whose id or name contains `keyword`. An empty keyword matches all.
    pub fn search(&self, keyword: &str) -> Vec<usize> {
        let kw = keyword.trim();
        self.records
            .iter()
            .enumerate()
            .filter(|(_, r)| kw.is_empty() || r.id.contains(kw) || r.name.contains(kw))
            .map(|(i, _)| i)
            .collect()
    }

    /// Mark a record present. Returns false when `idx` is out of range.
    pub fn sign(&mut self, idx: usize, at: NaiveDateTime) -> bool {
        match self.records.get_mut(idx) {
            Some(r) => {
                r.sign(at);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self, idx: usize) -> bool {
        match self.records.get_mut(idx) {
            Some(r) => {
                r.clear();
                true
            }
            None => false,
        }
    }

    pub fn clear_all(&mut self) {
        self.records.iter_mut().for_each(StudentRecord::clear);
    }

    pub fn stats(&self) -> Stats {
        let total = self.records.len();
        let present = self.records.iter().filter(|r| r.present).count();
        Stats {
            total,
            present,
            absent: total - present,
        }
    }
}
