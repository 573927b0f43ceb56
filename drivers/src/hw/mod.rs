pub mod imx6ull;
