// mainから直接呼び出すアプリケーションの動作モード(Cなど)のモジュール

mod calculator;

pub use calculator::CalculatorApp;
