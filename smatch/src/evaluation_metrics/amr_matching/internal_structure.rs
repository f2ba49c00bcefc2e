pub const UNBOUNDED: i32 = -1;

/// Alignment between the variables of the gold graph (x) and the variables of the test
/// graph (x_prime). Both directions are stored so that checking whether a gold variable is
/// already taken is O(1). Unbound variables are `UNBOUNDED`.
#[derive(Debug, Deserialize, Serialize, Eq, PartialEq, Clone)]
pub struct Bijection {
    pub prime2x: Vec<i32>,
    pub x2prime: Vec<i32>,
}

/// Best alignment found by a search strategy and the number of test triples it matches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentResult {
    pub bijection: Bijection,
    pub n_match: usize,
}

impl Bijection {
    pub fn new(n_x: usize, n_x_prime: usize) -> Bijection {
        Bijection {
            prime2x: vec![UNBOUNDED; n_x_prime],
            x2prime: vec![UNBOUNDED; n_x],
        }
    }

    pub fn clear(&mut self) {
        for i in 0..self.prime2x.len() {
            self.prime2x[i] = UNBOUNDED;
        }
        for i in 0..self.x2prime.len() {
            self.x2prime[i] = UNBOUNDED;
        }
    }

    pub fn push_both(&mut self, x: usize, x_prime: usize) {
        debug_assert!(!self.is_gold_node_bounded(x) && !self.is_pred_node_bounded(x_prime));
        self.x2prime[x] = x_prime as i32;
        self.prime2x[x_prime] = x as i32;
    }

    /// Release a test variable and the gold variable it was bound to
    pub fn unbind_x_prime(&mut self, x_prime: usize) {
        let x = self.prime2x[x_prime];
        if x != UNBOUNDED {
            self.x2prime[x as usize] = UNBOUNDED;
            self.prime2x[x_prime] = UNBOUNDED;
        }
    }

    #[inline]
    pub fn is_gold_node_bounded(&self, node_id: usize) -> bool {
        self.x2prime[node_id] != UNBOUNDED
    }

    #[inline]
    pub fn is_pred_node_bounded(&self, node_id: usize) -> bool {
        self.prime2x[node_id] != UNBOUNDED
    }

    #[inline]
    pub fn to_x(&self, x_prime: usize) -> i32 {
        self.prime2x[x_prime]
    }

    #[inline]
    pub fn to_x_prime(&self, x: usize) -> i32 {
        self.x2prime[x]
    }

    /// Gold variable bound to a test variable, if any
    #[inline]
    pub fn get_x(&self, x_prime: usize) -> Option<usize> {
        let x = self.prime2x[x_prime];
        if x == UNBOUNDED { None } else { Some(x as usize) }
    }

    pub fn n_bounded(&self) -> usize {
        self.prime2x.iter().filter(|&&x| x != UNBOUNDED).count()
    }
}
