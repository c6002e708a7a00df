pub mod d400_dre;
pub mod d401_cash_flow;
pub mod d402_aging;
pub mod d403_projections;
