use std::fmt::Debug;

use dynamic_connectivity::sequence::*;

/// Dummy implementation where most operations take linear time. The fast
/// implementations are compared against it on random operations.
pub struct SlowSequence<Ag: AggregatedData> {
    seqs: Vec<Vec<Entry<Ag>>>,
    u_to_seq: Vec<usize>,
}

impl<Ag: AggregatedData> Debug for SlowSequence<Ag> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SlowSequence:")?;
        for s in &self.seqs {
            if !s.is_empty() {
                write!(f, " [")?;
                for e in s {
                    write!(f, "{}({:?}) ", e.idx, e.data)?;
                }
                writeln!(f, "]")?;
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
struct Entry<Ag: AggregatedData> {
    idx: Idx,
    data: Ag::Data,
}

impl<Ag: AggregatedData> SlowSequence<Ag> {
    fn seq(&self, u: Idx) -> &Vec<Entry<Ag>> {
        &self.seqs[self.u_to_seq[u]]
    }
    fn entry(&self, u: Idx) -> &Entry<Ag> {
        self.seq(u).iter().find(|e| e.idx == u).unwrap()
    }
    fn agg_of(entries: &[Entry<Ag>]) -> Ag {
        entries
            .iter()
            .fold(Ag::default(), |agg, e| agg.merge(Ag::from(&e.data)))
    }
    /// All non-empty sequences, as lists of element indices.
    pub fn seqs(&self) -> Vec<Vec<Idx>> {
        self.seqs
            .iter()
            .filter(|s| !s.is_empty())
            .map(|s| s.iter().map(|e| e.idx).collect())
            .collect()
    }
}

impl<Ag: AggregatedData> Sequence<Ag> for SlowSequence<Ag> {
    fn with_seed(capacity: usize, _seed: u64) -> Self {
        Self {
            seqs: Vec::with_capacity(capacity),
            u_to_seq: Vec::with_capacity(capacity),
        }
    }

    fn create(&mut self, data: Ag::Data) -> Idx {
        let idx = self.u_to_seq.len();
        self.seqs.push(vec![Entry { idx, data }]);
        self.u_to_seq.push(self.seqs.len() - 1);
        idx
    }

    fn total_size(&self) -> usize {
        self.u_to_seq.len()
    }

    fn root(&self, u: Idx) -> Idx {
        if u == Self::EMPTY {
            return Self::EMPTY;
        }
        self.seq(u)[0].idx
    }

    fn data(&self, u: Idx) -> &Ag::Data {
        &self.entry(u).data
    }

    fn mutate_data(&mut self, u: Idx, f: impl FnOnce(&mut Ag::Data)) {
        f(&mut self.seqs[self.u_to_seq[u]]
            .iter_mut()
            .find(|e| e.idx == u)
            .unwrap()
            .data)
    }

    fn order(&self, u: Idx) -> usize {
        self.seq(u).iter().position(|e| e.idx == u).unwrap()
    }

    fn len(&self, u: Idx) -> usize {
        if u == Self::EMPTY {
            return 0;
        }
        self.seq(u).len()
    }

    fn total_agg(&self, u: Idx) -> Ag {
        if u == Self::EMPTY {
            return Ag::default();
        }
        Self::agg_of(self.seq(u))
    }

    fn find_kth(&self, u: Idx, k: usize) -> Idx {
        if u == Self::EMPTY {
            return Self::EMPTY;
        }
        self.seq(u).get(k).map_or(Self::EMPTY, |e| e.idx)
    }

    fn find_element(
        &self,
        u: Idx,
        mut search_strategy: impl FnMut(SearchData<'_, Ag>) -> SearchDirection,
    ) -> Idx {
        let left_agg = Ag::default();
        use SearchDirection::*;
        for i in 0..self.seq(u).len() {
            let right_agg = Self::agg_of(&self.seq(u)[i + 1..]);
            let e = &self.seq(u)[i];
            match search_strategy(SearchData {
                current_data: &e.data,
                left_agg: &left_agg,
                right_agg: &right_agg,
            }) {
                Found => return e.idx,
                NotFound => return Self::EMPTY,
                Left => panic!("should never go left: the left was already scanned"),
                Right => {}
            }
        }
        Self::EMPTY
    }

    fn concat(&mut self, u: Idx, v: Idx) -> Idx {
        if v == Self::EMPTY {
            return self.root(u);
        } else if u == Self::EMPTY {
            return self.root(v);
        }
        let su = self.u_to_seq[u];
        let sv = self.u_to_seq[v];
        assert_ne!(su, sv, "both sides already live in the same sequence");
        let mut tail = std::mem::take(&mut self.seqs[sv]);
        for e in &tail {
            self.u_to_seq[e.idx] = su;
        }
        self.seqs[su].append(&mut tail);
        self.root(u)
    }

    fn split_after(&mut self, u: Idx) -> Idx {
        let su = self.u_to_seq[u];
        let at = self.order(u) + 1;
        if at == self.seqs[su].len() {
            return Self::EMPTY;
        }
        let tail: Vec<_> = self.seqs[su].drain(at..).collect();
        let ns = self.seqs.len();
        for e in &tail {
            self.u_to_seq[e.idx] = ns;
        }
        let successor = tail[0].idx;
        self.seqs.push(tail);
        successor
    }

    fn check_invariants(&self) {
        for (i, s) in self.seqs.iter().enumerate() {
            for e in s {
                assert_eq!(self.u_to_seq[e.idx], i);
            }
        }
    }
}
