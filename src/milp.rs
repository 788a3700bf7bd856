//! Mixed-integer linear program representation.
//!
//! A solver-agnostic description of the optimization problem: variables with
//! kinds and bounds, linear constraints, and a linear objective. The model
//! builder produces one of these; any conforming solver backend can consume
//! it. Keeping the model independent of the backend keeps the solving
//! technology swappable.

/// Index of a decision variable within its model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarId(pub(crate) usize);

/// Kind and bounds of a decision variable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VarKind {
    /// Continuous variable in `[min, max]`.
    Continuous { min: f64, max: f64 },
    /// Binary variable in `{0, 1}`.
    Binary,
}

/// A linear expression: `Σ coefficient × variable + constant`.
#[derive(Debug, Clone, Default)]
pub struct LinearExpr {
    /// (variable, coefficient) terms.
    pub terms: Vec<(VarId, f64)>,
    /// Constant offset.
    pub constant: f64,
}

impl LinearExpr {
    /// Creates an empty (zero) expression.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an expression from a single term.
    pub fn term(var: VarId, coefficient: f64) -> Self {
        Self {
            terms: vec![(var, coefficient)],
            constant: 0.0,
        }
    }

    /// Adds a term in place and returns the expression.
    pub fn plus(mut self, var: VarId, coefficient: f64) -> Self {
        self.terms.push((var, coefficient));
        self
    }

    /// Adds a constant offset and returns the expression.
    pub fn plus_constant(mut self, constant: f64) -> Self {
        self.constant += constant;
        self
    }

    /// Evaluates the expression against solved variable values.
    pub fn eval(&self, values: &VariableValues) -> f64 {
        self.terms
            .iter()
            .map(|(var, coeff)| coeff * values.value(*var))
            .sum::<f64>()
            + self.constant
    }
}

/// Constraint comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// `expr ≤ rhs`
    LessOrEqual,
    /// `expr = rhs`
    Equal,
    /// `expr ≥ rhs`
    GreaterOrEqual,
}

/// A linear constraint `expr <op> rhs`.
#[derive(Debug, Clone)]
pub struct LinearConstraint {
    /// Left-hand side.
    pub expr: LinearExpr,
    /// Comparison operator.
    pub op: Comparison,
    /// Right-hand side constant.
    pub rhs: f64,
}

/// Direction of optimization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sense {
    /// Minimize the objective.
    #[default]
    Minimize,
    /// Maximize the objective.
    Maximize,
}

/// A complete mixed-integer linear program.
#[derive(Debug, Clone, Default)]
pub struct MilpModel {
    /// Variable kinds, indexed by [`VarId`].
    pub variables: Vec<VarKind>,
    /// All constraints.
    pub constraints: Vec<LinearConstraint>,
    /// Objective expression.
    pub objective: LinearExpr,
    /// Objective direction.
    pub sense: Sense,
}

impl MilpModel {
    /// Creates an empty minimization model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a variable and returns its id.
    pub fn add_variable(&mut self, kind: VarKind) -> VarId {
        let id = VarId(self.variables.len());
        self.variables.push(kind);
        id
    }

    /// Adds a binary variable.
    pub fn add_binary(&mut self) -> VarId {
        self.add_variable(VarKind::Binary)
    }

    /// Adds a continuous variable bounded to `[min, max]`.
    pub fn add_continuous(&mut self, min: f64, max: f64) -> VarId {
        self.add_variable(VarKind::Continuous { min, max })
    }

    /// Adds a constraint.
    pub fn add_constraint(&mut self, expr: LinearExpr, op: Comparison, rhs: f64) {
        self.constraints.push(LinearConstraint { expr, op, rhs });
    }

    /// Sets the objective.
    pub fn set_objective(&mut self, objective: LinearExpr, sense: Sense) {
        self.objective = objective;
        self.sense = sense;
    }

    /// Number of variables.
    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    /// Number of constraints.
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }
}

/// Solved variable values, indexed by [`VarId`].
#[derive(Debug, Clone)]
pub struct VariableValues(Vec<f64>);

impl VariableValues {
    /// Wraps a value vector (one entry per model variable, in id order).
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    /// Value of a variable.
    pub fn value(&self, var: VarId) -> f64 {
        self.0[var.0]
    }

    /// Whether a binary variable is set (rounds against solver tolerance).
    pub fn is_set(&self, var: VarId) -> bool {
        self.value(var) > 0.5
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the value vector is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_building() {
        let mut model = MilpModel::new();
        let x = model.add_binary();
        let y = model.add_continuous(0.0, 10.0);
        model.add_constraint(LinearExpr::term(x, 3.0).plus(y, 1.0), Comparison::LessOrEqual, 8.0);
        model.set_objective(LinearExpr::term(y, 1.0), Sense::Maximize);

        assert_eq!(model.variable_count(), 2);
        assert_eq!(model.constraint_count(), 1);
        assert_eq!(model.sense, Sense::Maximize);
        assert_eq!(model.variables[x.0], VarKind::Binary);
    }

    #[test]
    fn test_expr_eval() {
        let mut model = MilpModel::new();
        let x = model.add_binary();
        let y = model.add_continuous(0.0, 10.0);
        let expr = LinearExpr::term(x, 3.0).plus(y, 2.0).plus_constant(1.0);

        let values = VariableValues::new(vec![1.0, 4.5]);
        assert!((expr.eval(&values) - 13.0).abs() < 1e-12);
        assert!(values.is_set(x));
        assert!((values.value(y) - 4.5).abs() < 1e-12);
    }

    #[test]
    fn test_binary_rounding_tolerance() {
        let values = VariableValues::new(vec![0.9999999, 1e-9]);
        assert!(values.is_set(VarId(0)));
        assert!(!values.is_set(VarId(1)));
    }
}
