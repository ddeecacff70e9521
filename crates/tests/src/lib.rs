#[cfg(test)]
mod common;

#[cfg(test)]
mod booking_submit_tests;

#[cfg(test)]
mod booking_list_tests;

#[cfg(test)]
mod student_tests;

#[cfg(test)]
mod notification_tests;


#[cfg(test)]
mod report_tests;
