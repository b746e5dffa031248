pub mod donor_self_check;
