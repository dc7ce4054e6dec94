use chrono::NaiveDate;

//whole units affordable at the target leverage, truncated toward zero
pub fn position_size(capital: f64, leverage: f64, price: f64, multiplier: f64) -> i64 {
    (capital * leverage / (price * multiplier)).trunc() as i64
}

//mutable per-trajectory state, owned by a single run
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    pub capital: f64,

    //signed number of shares / contracts
    pub position: i64,

    pub last_price: f64,

    //date of the most recent re-size, used for cadence comparison
    pub last_rebalance: Option<NaiveDate>,

    //running trading cost
    pub cost: f64,
}

impl SimulationState {
    //opens the initial position from zero at `price`
    pub fn enter(
        capital: f64,
        leverage: f64,
        date: NaiveDate,
        price: f64,
        multiplier: f64,
    ) -> Self {
        SimulationState {
            capital,
            position: position_size(capital, leverage, price, multiplier),
            last_price: price,
            last_rebalance: Some(date),
            cost: 0.0,
        }
    }

    //applies price move and carry on the position held before any re-size
    //returns (price pnl, carry income)
    pub fn mark_to_market(
        &mut self,
        price: f64,
        multiplier: f64,
        carry_per_step: f64,
    ) -> (f64, f64) {
        let delta = price - self.last_price;
        let pnl = self.position as f64 * delta * multiplier;
        //carry accrues on the pre-step notional
        let carry = self.position as f64 * self.last_price * multiplier * carry_per_step;

        self.capital += pnl + carry;
        self.last_price = price;
        (pnl, carry)
    }

    //moves to `target` paying `cost`, returns the signed trade size
    pub fn rebalance_to(&mut self, target: i64, cost: f64, date: NaiveDate) -> i64 {
        let trade = target - self.position;
        self.capital -= cost;
        self.cost += cost;
        self.position = target;
        self.last_rebalance = Some(date);
        trade
    }

    //notional / capital at the current price
    pub fn leverage(&self, multiplier: f64) -> f64 {
        if self.capital == 0.0 {
            return 0.0;
        }
        self.position as f64 * self.last_price * multiplier / self.capital
    }
}
